//! Macros for reducing boilerplate when declaring resource fields

/// Implement [`DynamicFields`](crate::core::resource::DynamicFields) for a type
///
/// Fields are listed in output order. A field may carry `write_only` and/or
/// `read_only` markers in parentheses. The registry is built on first use and
/// shared by every request afterwards.
///
/// # Example
/// ```rust,ignore
/// #[derive(Serialize)]
/// pub struct User {
///     id: Uuid,
///     name: String,
///     email: String,
///     password: String,
/// }
///
/// impl_dynamic_fields!(User, [id(read_only), name, email, password(write_only)]);
/// ```
#[macro_export]
macro_rules! impl_dynamic_fields {
    (
        $type:ty,
        [ $( $field:ident $( ( $( $flag:ident ),* $(,)? ) )? ),* $(,)? ]
    ) => {
        impl $crate::core::resource::DynamicFields for $type {
            fn field_registry() -> &'static $crate::core::field::FieldRegistry {
                use std::sync::OnceLock;
                static REGISTRY: OnceLock<$crate::core::field::FieldRegistry> = OnceLock::new();
                REGISTRY.get_or_init(|| {
                    $crate::core::field::FieldRegistry::new()
                        $(
                            .with(
                                $crate::core::field::FieldDescriptor::new(stringify!($field))
                                    $( $( .$flag() )* )?
                            )
                        )*
                })
            }
        }
    };
}
