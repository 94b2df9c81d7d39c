use entityit_core::runtime::{EntityDeclaration, EntityMapper};
use entityit_macros::Entity;

#[derive(Default)]
pub struct SampleMapper;

impl EntityMapper<i64, f64> for SampleMapper {
    fn map_domain_to_entity(&self, domain: i64) -> f64 {
        domain as f64
    }
    fn map_entity_to_domain(&self, entity: f64) -> i64 {
        entity as i64
    }
}

#[derive(Debug, Entity)]
#[entity(serializable = false, nullability = "full", conversions = true)]
pub struct SampleClass {
    #[entity(not_null)]
    pub id: String,
    pub flag: bool,
    #[entity(rename = "iAmFloat")]
    pub integer: f32,
    #[entity(rename = "iAmDouble", map_with = SampleMapper)]
    pub long: i64,
}

#[derive(Entity)]
#[entity]
struct Address {
    #[entity(map_with = "SampleMapper")]
    r#type: Option<i64>,
}

fn main() {
    assert_eq!(SampleClass::NAME, "SampleClass");
    assert_eq!(SampleClass::ENTITY_NAME, "SampleClassEntity");
    assert_eq!(Address::ENTITY_NAME, "AddressEntity");
    let address = Address { r#type: None };
    assert!(address.r#type.is_none());
}
