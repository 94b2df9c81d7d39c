// @generated by entityit. Do not edit.

pub mod address_entity;

pub use address_entity::AddressEntity;
