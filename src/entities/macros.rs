//! Macros for reducing boilerplate when defining records
//!
//! Every record stores `id` and `created_at` and exposes a fixed list of
//! attributes by name. [`impl_record!`](crate::impl_record) writes that part
//! of the [`Record`](crate::core::entity::Record) implementation and splices
//! in the record-specific methods.

/// Implement [`Record`](crate::core::entity::Record) for a struct
///
/// Each listed field must convert into a
/// [`FieldValue`](crate::core::field::FieldValue) through `Into`.
/// The trailing block supplies `from_create`, `apply_update` and any
/// overridden default methods.
///
/// # Example
///
/// ```rust,ignore
/// impl_record!(
///     Tag,
///     "tag",
///     create: TagCreate,
///     update: TagUpdate,
///     fields: [id, user_id, label, created_at],
///     {
///         fn from_create(payload: TagCreate) -> Self { ... }
///         fn apply_update(&mut self, patch: TagUpdate) { ... }
///     }
/// );
/// ```
#[macro_export]
macro_rules! impl_record {
    (
        $type:ty,
        $entity:literal,
        create: $create:ty,
        update: $update:ty,
        fields: [$($field:ident),* $(,)?],
        { $($body:tt)* }
    ) => {
        impl $crate::core::entity::Record for $type {
            type Create = $create;
            type Update = $update;

            const ENTITY: &'static str = $entity;

            fn id(&self) -> ::uuid::Uuid {
                self.id
            }

            fn created_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.created_at
            }

            fn fields() -> &'static [&'static str] {
                &[$(stringify!($field)),*]
            }

            fn field_value(&self, field: &str) -> Option<$crate::core::field::FieldValue> {
                match field {
                    $(stringify!($field) => Some(self.$field.clone().into()),)*
                    _ => None,
                }
            }

            $($body)*
        }
    };
}

/// Build the public projection of a record by copying the listed fields
///
/// ```rust,ignore
/// impl_public!(Tag => TagPublic { id, user_id, label, created_at });
/// ```
#[macro_export]
macro_rules! impl_public {
    ($record:ty => $public:ident { $($field:ident),* $(,)? }) => {
        impl From<$record> for $public {
            fn from(record: $record) -> Self {
                Self {
                    $($field: record.$field,)*
                }
            }
        }
    };
}
