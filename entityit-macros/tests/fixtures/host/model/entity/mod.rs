// @generated by entityit. Do not edit.

pub mod account_entity;
pub mod counter_entity;
pub mod counter_mappers;

pub use account_entity::AccountEntity;
pub use counter_entity::CounterEntity;
pub use counter_mappers::CounterMappers;
