// @generated by entityit from crate::host::model::Account. Do not edit.

#[derive(Debug, Clone, PartialEq)]
#[allow(non_snake_case)]
pub struct AccountEntity {
    pub id: String,
    pub active: bool,
    pub balanceCents: i64,
    pub nickname: Option<String>,
}
#[allow(non_snake_case)]
impl crate::host::model::entity::AccountEntity {
    pub fn new(
        id: String,
        active: bool,
        balanceCents: i64,
        nickname: Option<String>,
    ) -> Self {
        Self {
            id,
            active,
            balanceCents,
            nickname,
        }
    }
    pub fn to_domain(
        self,
    ) -> ::core::result::Result<
        crate::host::model::Account,
        ::entityit_core::runtime::ConversionError,
    > {
        ::core::result::Result::Ok(crate::host::model::Account {
            id: self.id,
            active: self.active,
            balance: self.balanceCents,
            nickname: self.nickname,
        })
    }
}
#[allow(non_snake_case)]
impl crate::host::model::Account {
    pub fn to_entity(
        self,
    ) -> ::core::result::Result<
        crate::host::model::entity::AccountEntity,
        ::entityit_core::runtime::ConversionError,
    > {
        ::core::result::Result::Ok(crate::host::model::entity::AccountEntity {
            id: self.id,
            active: self.active,
            balanceCents: self.balance,
            nickname: self.nickname,
        })
    }
}
impl ::entityit_core::runtime::ToEntity for crate::host::model::Account {
    type Entity = crate::host::model::entity::AccountEntity;
    fn to_entity(
        self,
    ) -> ::core::result::Result<
        crate::host::model::entity::AccountEntity,
        ::entityit_core::runtime::ConversionError,
    > {
        Self::to_entity(self)
    }
}
impl ::entityit_core::runtime::ToDomain for crate::host::model::entity::AccountEntity {
    type Domain = crate::host::model::Account;
    fn to_domain(
        self,
    ) -> ::core::result::Result<
        crate::host::model::Account,
        ::entityit_core::runtime::ConversionError,
    > {
        Self::to_domain(self)
    }
}
