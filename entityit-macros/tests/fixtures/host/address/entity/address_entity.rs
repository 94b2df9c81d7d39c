// @generated by entityit from crate::host::address::Address. Do not edit.

#[derive(Debug, Clone, PartialEq)]
#[allow(non_snake_case)]
pub struct AddressEntity {
    pub street: String,
    pub zip: u32,
}
#[allow(non_snake_case)]
impl crate::host::address::entity::AddressEntity {
    pub fn new(street: String, zip: u32) -> Self {
        Self { street, zip }
    }
    pub fn to_domain(
        self,
    ) -> ::core::result::Result<
        crate::host::address::Address,
        ::entityit_core::runtime::ConversionError,
    > {
        ::core::result::Result::Ok(crate::host::address::Address {
            street: self.street,
            zip: ::core::option::Option::Some(self.zip),
        })
    }
}
#[allow(non_snake_case)]
impl crate::host::address::Address {
    pub fn to_entity(
        self,
    ) -> ::core::result::Result<
        crate::host::address::entity::AddressEntity,
        ::entityit_core::runtime::ConversionError,
    > {
        ::core::result::Result::Ok(crate::host::address::entity::AddressEntity {
            street: self.street,
            zip: self.zip.unwrap_or_else(|| 0),
        })
    }
}
impl ::entityit_core::runtime::ToEntity for crate::host::address::Address {
    type Entity = crate::host::address::entity::AddressEntity;
    fn to_entity(
        self,
    ) -> ::core::result::Result<
        crate::host::address::entity::AddressEntity,
        ::entityit_core::runtime::ConversionError,
    > {
        Self::to_entity(self)
    }
}
impl ::entityit_core::runtime::ToDomain for crate::host::address::entity::AddressEntity {
    type Domain = crate::host::address::Address;
    fn to_domain(
        self,
    ) -> ::core::result::Result<
        crate::host::address::Address,
        ::entityit_core::runtime::ConversionError,
    > {
        Self::to_domain(self)
    }
}
