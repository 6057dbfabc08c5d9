//! Schema-driven column discovery.
//!
//! Each role carries a priority-ordered list of case-insensitive name fragments
//! in Spanish and English. For each fragment the schema is scanned in remote
//! order, and the first unclaimed column containing the fragment with a type
//! the role accepts wins. A claimed column leaves the pool.

use crate::error::SubmitError;
use common::model::mapping::{FieldMapping, Role};
use common::model::schema::{ColumnType, RemoteSchema};
use log::debug;

/// Compound bilingual fragments ("autor en") resolve before the generic
/// prefixes ("autor") they contain.
const RESOLUTION_ORDER: [Role; 6] = [
    Role::Title,
    Role::Date,
    Role::SecondaryAuthor,
    Role::SecondaryBody,
    Role::PrimaryAuthor,
    Role::PrimaryBody,
];

pub fn patterns(role: Role) -> &'static [&'static str] {
    match role {
        Role::Title => &["name", "nombre", "title", "título"],
        Role::Date => &["fecha", "date"],
        Role::PrimaryBody => &["cita", "quote", "texto", "text", "content", "contenido"],
        Role::PrimaryAuthor => &["autor", "author", "escritor", "writer"],
        // " en" needs the leading space so it cannot match inside "Entrada" or "Contenido".
        Role::SecondaryBody => &[
            "cita en",
            "quote en",
            "english",
            "inglés",
            "translation",
            "traducción",
            " en",
        ],
        Role::SecondaryAuthor => &["autor en", "author en", "english author", "autor inglés"],
    }
}

fn find_column<'a>(schema: &'a RemoteSchema, role: Role, taken: &FieldMapping) -> Option<&'a str> {
    patterns(role).iter().find_map(|pattern| {
        schema
            .columns
            .iter()
            .filter(|column| !taken.is_column_taken(&column.name))
            .find(|column| {
                column.name.to_lowercase().contains(*pattern) && role.accepts(&column.column_type)
            })
            .map(|column| column.name.as_str())
    })
}

/// Assigns at most one column per role. Title and date fall back to the first
/// column of their type when no fragment matches. Fails only when the schema has
/// no title-typed column at all.
pub fn resolve(schema: &RemoteSchema) -> Result<FieldMapping, SubmitError> {
    let mut mapping = FieldMapping::new();

    for role in RESOLUTION_ORDER {
        let column = find_column(schema, role, &mapping).or_else(|| match role {
            Role::Title => schema
                .first_of_type(&ColumnType::Title)
                .map(|column| column.name.as_str()),
            Role::Date => schema
                .first_of_type(&ColumnType::Date)
                .map(|column| column.name.as_str()),
            _ => None,
        });

        match column {
            Some(column) => {
                debug!("role {role:?} -> column {column:?}");
                mapping.insert(role, column);
            }
            None if role == Role::Title => {
                return Err(SubmitError::MappingUnresolved {
                    available: schema.column_names(),
                });
            }
            None => debug!("role {role:?} has no matching column"),
        }
    }

    Ok(mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::fake::quotes_schema;
    use common::model::schema::Column;
    use pretty_assertions::assert_eq;

    fn schema(columns: &[(&str, ColumnType)]) -> RemoteSchema {
        RemoteSchema {
            title: "Quotes".to_string(),
            url: None,
            columns: columns
                .iter()
                .map(|(name, column_type)| Column::new(*name, column_type.clone()))
                .collect(),
        }
    }

    #[test]
    fn bilingual_collection_maps_every_present_role() {
        let mapping = resolve(&quotes_schema()).unwrap();

        assert_eq!(mapping.get(Role::Title), Some("Nombre"));
        assert_eq!(mapping.get(Role::PrimaryBody), Some("Cita"));
        assert_eq!(mapping.get(Role::PrimaryAuthor), Some("Autor"));
        assert_eq!(mapping.get(Role::SecondaryBody), Some("Cita EN"));
        assert_eq!(mapping.get(Role::Date), Some("Fecha"));
        assert_eq!(mapping.get(Role::SecondaryAuthor), None);
        assert_eq!(mapping.len(), 5);
    }

    #[test]
    fn english_columns_listed_first_still_map_to_secondary_roles() {
        let mapping = resolve(&schema(&[
            ("Quote EN", ColumnType::Text),
            ("Author EN", ColumnType::Text),
            ("Quote", ColumnType::Text),
            ("Author", ColumnType::SingleSelect),
            ("Name", ColumnType::Title),
            ("Date", ColumnType::Date),
        ]))
        .unwrap();

        assert_eq!(mapping.get(Role::SecondaryBody), Some("Quote EN"));
        assert_eq!(mapping.get(Role::SecondaryAuthor), Some("Author EN"));
        assert_eq!(mapping.get(Role::PrimaryBody), Some("Quote"));
        assert_eq!(mapping.get(Role::PrimaryAuthor), Some("Author"));
    }

    #[test]
    fn title_and_date_resolve_whenever_their_types_exist() {
        let mapping = resolve(&schema(&[
            ("Entrada", ColumnType::Text),
            ("Resumen", ColumnType::Title),
            ("Creado", ColumnType::Date),
        ]))
        .unwrap();

        // No fragment matches either name; both fall back by type.
        assert_eq!(mapping.get(Role::Title), Some("Resumen"));
        assert_eq!(mapping.get(Role::Date), Some("Creado"));
        assert_eq!(mapping.get(Role::SecondaryBody), None);

        let mapping = resolve(&schema(&[
            ("Resumen", ColumnType::Title),
            ("Fecha de publicación", ColumnType::Date),
        ]))
        .unwrap();
        assert_eq!(mapping.get(Role::Date), Some("Fecha de publicación"));
    }

    #[test]
    fn type_mismatch_skips_a_name_match() {
        let mapping = resolve(&schema(&[
            ("Name", ColumnType::Title),
            ("Date added", ColumnType::Text),
            ("Fecha", ColumnType::Date),
            ("Cita", ColumnType::Date),
            ("Texto", ColumnType::Text),
        ]))
        .unwrap();

        assert_eq!(mapping.get(Role::Date), Some("Fecha"));
        assert_eq!(mapping.get(Role::PrimaryBody), Some("Texto"));
    }

    #[test]
    fn no_column_is_assigned_twice() {
        let mapping = resolve(&schema(&[
            ("Nombre", ColumnType::Title),
            ("Cita", ColumnType::Text),
        ]))
        .unwrap();

        assert_eq!(mapping.get(Role::PrimaryBody), Some("Cita"));
        assert_eq!(mapping.get(Role::SecondaryBody), None);
        assert_eq!(mapping.len(), 2);
    }

    #[test]
    fn collection_without_title_column_is_unresolved() {
        let err = resolve(&schema(&[
            ("Nombre", ColumnType::Text),
            ("Fecha", ColumnType::Date),
        ]))
        .unwrap_err();

        match err {
            SubmitError::MappingUnresolved { available } => {
                assert_eq!(available, vec!["Nombre", "Fecha"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn resolution_is_deterministic() {
        let schema = quotes_schema();
        assert_eq!(resolve(&schema).unwrap(), resolve(&schema).unwrap());
    }
}
