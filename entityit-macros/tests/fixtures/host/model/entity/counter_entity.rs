// @generated by entityit from crate::host::model::Counter. Do not edit.

#[derive(Debug, Clone, PartialEq)]
#[allow(non_snake_case)]
pub struct CounterEntity {
    pub count: Option<i64>,
    pub label: Option<String>,
    pub home: Option<crate::host::address::entity::AddressEntity>,
    pub backup: Option<crate::host::address::entity::AddressEntity>,
}
#[allow(non_snake_case)]
impl crate::host::model::entity::CounterEntity {
    pub fn new(
        count: Option<i64>,
        label: Option<String>,
        home: Option<crate::host::address::entity::AddressEntity>,
        backup: Option<crate::host::address::entity::AddressEntity>,
    ) -> Self {
        Self { count, label, home, backup }
    }
    pub fn to_domain(
        self,
    ) -> ::core::result::Result<
        crate::host::model::Counter,
        ::entityit_core::runtime::ConversionError,
    > {
        ::core::result::Result::Ok(crate::host::model::Counter {
            count: ::entityit_core::runtime::EntityMapper::<
                i64,
                i64,
            >::map_entity_to_domain(
                crate::host::model::entity::CounterMappers::cratehostmodelOffsetMapper(),
                self.count.unwrap_or_else(|| 0i64),
            ),
            label: self.label.unwrap_or_else(|| ::std::string::String::new()),
            home: ::entityit_core::runtime::ToDomain::to_domain(
                self
                    .home
                    .ok_or_else(|| ::entityit_core::runtime::ConversionError::absent(
                        "CounterEntity",
                        "home",
                    ))?,
            )?,
            backup: self
                .backup
                .map(|value| ::entityit_core::runtime::ToDomain::to_domain(value))
                .transpose()?,
        })
    }
}
#[allow(non_snake_case)]
impl crate::host::model::Counter {
    pub fn to_entity(
        self,
    ) -> ::core::result::Result<
        crate::host::model::entity::CounterEntity,
        ::entityit_core::runtime::ConversionError,
    > {
        ::core::result::Result::Ok(crate::host::model::entity::CounterEntity {
            count: ::core::option::Option::Some(
                ::entityit_core::runtime::EntityMapper::<
                    i64,
                    i64,
                >::map_domain_to_entity(
                    crate::host::model::entity::CounterMappers::cratehostmodelOffsetMapper(),
                    self.count,
                ),
            ),
            label: ::core::option::Option::Some(self.label),
            home: ::core::option::Option::Some(
                ::entityit_core::runtime::ToEntity::to_entity(self.home)?,
            ),
            backup: self
                .backup
                .map(|value| ::entityit_core::runtime::ToEntity::to_entity(value))
                .transpose()?,
        })
    }
}
impl ::entityit_core::runtime::ToEntity for crate::host::model::Counter {
    type Entity = crate::host::model::entity::CounterEntity;
    fn to_entity(
        self,
    ) -> ::core::result::Result<
        crate::host::model::entity::CounterEntity,
        ::entityit_core::runtime::ConversionError,
    > {
        Self::to_entity(self)
    }
}
impl ::entityit_core::runtime::ToDomain for crate::host::model::entity::CounterEntity {
    type Domain = crate::host::model::Counter;
    fn to_domain(
        self,
    ) -> ::core::result::Result<
        crate::host::model::Counter,
        ::entityit_core::runtime::ConversionError,
    > {
        Self::to_domain(self)
    }
}
