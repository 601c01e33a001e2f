/// Create an enum whose variants can be cycled through with tab/shift-tab
#[macro_export]
macro_rules! form_fields {
    ($name:ident, $($variant:ident),*) => {
        /// Which field has focus
        #[derive(Debug, Clone, Copy)]
        pub enum $name {
            $(
                /// One of the form's fields
                $variant
            ),*
        }

        impl $name {
            /// All fields, in tab order
            const FIELDS: &'static [$name] = &[
                $($name::$variant),*
            ];

            /// Position in the tab order
            fn index(&self) -> usize {
                match self {
                    $(Self::$variant => $name::$variant as usize),*
                }
            }

            /// Rotate through the fields (e.g. with tab)
            fn next(&self) -> Self {
                Self::FIELDS[(self.index() + 1) % Self::FIELDS.len()]
            }

            /// Rotate through the fields in reverse (e.g. with shift-tab)
            fn prev(&self) -> Self {
                Self::FIELDS[(self.index() + Self::FIELDS.len() - 1) % Self::FIELDS.len()]
            }
        }
    };
}
