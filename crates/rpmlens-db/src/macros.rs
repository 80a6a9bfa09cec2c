//! Macros for defining entity schemas.
//!
//! The [`define_entity!`] macro generates column constants for a table,
//! tying aliased column references to Rust types.

/// Defines a module with typed column constants for a database table.
///
/// Every table is addressed through a short alias so that the same columns
/// can be used in joins and correlated sub-queries. Columns holding JSON are
/// tagged with `[json]` so they are selected through `json(...)`.
///
/// # Syntax
///
/// ```ignore
/// define_entity!(
///     groups {
///         table: "rpm_packagegroup",
///         alias: "pg",
///         columns: {
///             NAME: String => "name",
///             PACKAGES: String => "packages" [json]
///         }
///     }
/// );
/// ```
///
/// This expands to:
///
/// ```ignore
/// pub mod groups {
///     pub const TABLE: &str = "rpm_packagegroup pg";
///     pub const ALIAS: &str = "pg";
///     pub const NAME: Col<String> = Col::new("pg.name", "name");
///     pub const PACKAGES: Col<String> = Col::json("pg.packages", "packages");
/// }
/// ```
#[macro_export]
macro_rules! define_entity {
    (
        $entity:ident {
            table: $table:literal,
            alias: $alias:literal,
            columns: {
                $($col_name:ident: $col_type:ty => $db_col:literal $([$kind:ident])?),* $(,)?
            }
        }
    ) => {
        pub mod $entity {
            #[allow(unused_imports)]
            use $crate::expr::column::Col;

            pub const TABLE: &str = concat!($table, " ", $alias);
            pub const ALIAS: &str = $alias;

            $(
                $crate::define_column!($col_name, $col_type, $alias, $db_col $(, $kind)?);
            )*
        }
    };
}

#[macro_export]
macro_rules! define_column {
    ($name:ident, $type:ty, $alias:literal, $db_col:literal, json) => {
        pub const $name: Col<$type> = Col::json(concat!($alias, ".", $db_col), $db_col);
    };

    ($name:ident, $type:ty, $alias:literal, $db_col:literal) => {
        pub const $name: Col<$type> = Col::new(concat!($alias, ".", $db_col), $db_col);
    };
}
