//! Declaration macros for model types.

/// Declares a model struct together with its [`Model`](crate::Model)
/// implementation.
///
/// The struct derives `Debug`, `Clone`, `Default` and `PartialEq`. Each field
/// becomes a property named after the field, unless a property name is given
/// with `=> "name"`. A model can extend another one: the parent is embedded
/// as a named field, its properties come first, and the child dereferences
/// to it.
///
/// ```
/// use json_model::{json_model, Mapper, Model, Registry};
/// use serde_json::json;
///
/// json_model! {
///     pub struct User {
///         pub user_name: String => "userName",
///         pub age: u32,
///     }
/// }
///
/// json_model! {
///     pub struct Admin extends User as user {
///         pub level: u8,
///     }
/// }
///
/// let registry = Registry::new();
/// registry.set_rename(User::kind(), [("usr_nm", "userName")]);
///
/// let mapper = Mapper::new(&registry);
/// let admin: Admin = mapper.decode_value(&json!({"usr_nm": "alice", "age": 30, "level": 2}));
/// assert_eq!(admin.user_name, "alice");
/// assert_eq!(admin.level, 2);
/// ```
#[macro_export]
macro_rules! json_model {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fattr:meta])*
                $fvis:vis $field:ident : $fty:ty $(=> $pname:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            $(
                $(#[$fattr])*
                $fvis $field: $fty,
            )*
        }

        impl $crate::Model for $name {
            fn kind() -> &'static $crate::ModelKind {
                static KIND: $crate::ModelKind =
                    $crate::ModelKind::of::<$name>(::core::stringify!($name), ::core::option::Option::None);
                &KIND
            }

            fn properties() -> &'static [$crate::Property<Self>] {
                static PROPERTIES: ::std::sync::OnceLock<::std::vec::Vec<$crate::Property<$name>>> =
                    ::std::sync::OnceLock::new();
                PROPERTIES.get_or_init(|| {
                    ::std::vec![
                        $(
                            $crate::Property::field(
                                $crate::__property_name!($field $(, $pname)?),
                                |model: &$name| &model.$field,
                                |model: &mut $name| &mut model.$field,
                            ),
                        )*
                    ]
                })
            }
        }

        $crate::impl_model_field!($name);
    };

    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident extends $parent:ty as $base:ident {
            $(
                $(#[$fattr:meta])*
                $fvis:vis $field:ident : $fty:ty $(=> $pname:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            pub $base: $parent,
            $(
                $(#[$fattr])*
                $fvis $field: $fty,
            )*
        }

        impl $crate::Model for $name {
            fn kind() -> &'static $crate::ModelKind {
                static KIND: $crate::ModelKind = $crate::ModelKind::of::<$name>(
                    ::core::stringify!($name),
                    ::core::option::Option::Some(<$parent as $crate::Model>::kind),
                );
                &KIND
            }

            fn properties() -> &'static [$crate::Property<Self>] {
                static PROPERTIES: ::std::sync::OnceLock<::std::vec::Vec<$crate::Property<$name>>> =
                    ::std::sync::OnceLock::new();
                PROPERTIES.get_or_init(|| {
                    let mut properties: ::std::vec::Vec<$crate::Property<$name>> =
                        <$parent as $crate::Model>::properties()
                            .iter()
                            .map(|property| {
                                $crate::Property::inherit(
                                    property,
                                    |model: &$name| &model.$base,
                                    |model: &mut $name| &mut model.$base,
                                )
                            })
                            .collect();
                    properties.extend(::std::vec![
                        $(
                            $crate::Property::field(
                                $crate::__property_name!($field $(, $pname)?),
                                |model: &$name| &model.$field,
                                |model: &mut $name| &mut model.$field,
                            ),
                        )*
                    ]);
                    properties
                })
            }
        }

        impl ::core::ops::Deref for $name {
            type Target = $parent;

            fn deref(&self) -> &$parent {
                &self.$base
            }
        }

        impl ::core::ops::DerefMut for $name {
            fn deref_mut(&mut self) -> &mut $parent {
                &mut self.$base
            }
        }

        $crate::impl_model_field!($name);
    };
}

/// Lets a hand-written [`Model`](crate::Model) be used as a property of
/// other models. [`json_model!`] does this automatically.
#[macro_export]
macro_rules! impl_model_field {
    ($name:ty) => {
        impl $crate::JsonField for $name {
            const SHAPE: $crate::Shape = $crate::Shape::Model;

            fn encode_field(
                &self,
                cx: &$crate::EncodeCx<'_>,
            ) -> ::core::result::Result<$crate::Value, $crate::EncodeError> {
                cx.encode_model(self)
            }

            fn decode_field(value: &$crate::Value, cx: &$crate::DecodeCx<'_>) -> ::core::option::Option<Self> {
                cx.decode_model::<Self>(value)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __property_name {
    ($field:ident) => {
        ::core::stringify!($field)
    };
    ($field:ident, $name:literal) => {
        $name
    };
}
