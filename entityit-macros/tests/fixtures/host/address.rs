pub mod entity;

#[derive(Debug, Clone, PartialEq, entityit_macros::Entity)]
#[entity(serializable = false, nullability = "none")]
pub struct Address {
    pub street: String,
    pub zip: Option<u32>,
}
