//! Declarative macros for variant definitions

/// Declares the configurable-field table of a variant.
///
/// Each entry maps a document option tag to a `String` or
/// `Option<String>` field of the type:
///
/// ```
/// #[derive(Debug, Default)]
/// struct Notify {
///     channel: String,
///     icon: Option<String>,
/// }
///
/// stageline::configurable!(Notify {
///     "channel" => channel,
///     "icon" => icon,
/// });
/// ```
#[macro_export]
macro_rules! configurable {
    ($ty:ty { $($tag:literal => $field:ident),* $(,)? }) => {
        impl $crate::pipeline::Configurable for $ty {
            fn field_table(&mut self) -> $crate::pipeline::FieldTable<'_> {
                $crate::pipeline::FieldTable::new()
                    $(.field($tag, &mut self.$field))*
            }

            fn options(&self) -> ::std::vec::Vec<(&'static str, ::std::option::Option<&str>)> {
                ::std::vec![$(($tag, $crate::pipeline::FieldValue::as_text(&self.$field))),*]
            }
        }
    };
}
