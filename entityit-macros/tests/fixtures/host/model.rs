use crate::host::address::Address;
use entityit_core::runtime::EntityMapper;

pub mod entity;

#[derive(Debug, Clone, PartialEq, entityit_macros::Entity)]
#[entity(serializable = false)]
pub struct Account {
    #[entity(not_null)]
    pub id: String,
    pub active: bool,
    #[entity(rename = "balanceCents")]
    pub balance: i64,
    pub nickname: Option<String>,
}

#[derive(Debug, Clone, PartialEq, entityit_macros::Entity)]
#[entity(serializable = false, nullability = "full")]
pub struct Counter {
    #[entity(map_with = OffsetMapper)]
    pub count: i64,
    pub label: String,
    pub home: Address,
    pub backup: Option<Address>,
}

/// Stores counts shifted down by 100.
#[derive(Default)]
pub struct OffsetMapper;

impl EntityMapper<i64, i64> for OffsetMapper {
    fn map_domain_to_entity(&self, domain: i64) -> i64 {
        domain - 100
    }

    fn map_entity_to_domain(&self, entity: i64) -> i64 {
        entity + 100
    }
}
