// @generated by entityit from crate::host::model::Counter. Do not edit.

#[derive(Debug, Clone, Copy)]
pub struct CounterMappers;
#[allow(non_snake_case)]
impl crate::host::model::entity::CounterMappers {
    pub fn cratehostmodelOffsetMapper() -> &'static crate::host::model::OffsetMapper {
        static INSTANCE: ::std::sync::OnceLock<crate::host::model::OffsetMapper> = ::std::sync::OnceLock::new();
        INSTANCE.get_or_init(<crate::host::model::OffsetMapper as ::core::default::Default>::default)
    }
}
