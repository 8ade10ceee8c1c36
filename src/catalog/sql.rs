//! SQL text for the catalog statements
//!
//! The fetch statement interpolates two identifiers: the layer table and its
//! geometry column. Both arrive here already checked against the identifier
//! predicate (`LayerName` for the table, `PostgisCatalog` for the column),
//! and both are double quoted so case is preserved exactly as given.

use super::identifier::LayerName;

/// Every table registered in PostGIS' geometry catalog, byte-wise sorted.
///
/// The collation sits in the select list: `ORDER BY` may name an output
/// column, but not use it inside an expression.
pub const LIST_LAYERS_SQL: &str = "SELECT DISTINCT f_table_name::text COLLATE \"C\" AS name \
     FROM geometry_columns \
     ORDER BY name";

/// Geometry column of one layer, `$1` being the table name.
pub const GEOMETRY_COLUMN_SQL: &str = "SELECT f_geometry_column::text \
     FROM geometry_columns \
     WHERE f_table_name::text = $1 \
     ORDER BY f_table_schema::name = ANY (current_schemas(false)) DESC, f_geometry_column \
     LIMIT 1";

/// Quote an identifier for PostgreSQL.
fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Build the statement that returns a layer as one FeatureCollection document.
///
/// `ST_AsGeoJSON(record, column)` renders a whole row as a Feature and leaves
/// the named geometry column out of `properties`. Rows with a null or invalid
/// geometry are filtered out before aggregation. The document comes back as
/// text so it can be passed through without re-encoding.
pub fn fetch_layer_sql(layer: &LayerName, geometry_column: &str) -> String {
    let table = quote_ident(layer.as_str());
    let geom = quote_ident(geometry_column);
    format!(
        "SELECT json_build_object(\
             'type', 'FeatureCollection', \
             'features', COALESCE(json_agg(ST_AsGeoJSON(t.*, $1)::json), '[]'::json)\
         )::text \
         FROM {table} AS t \
         WHERE t.{geom} IS NOT NULL AND ST_IsValid(t.{geom})"
    )
}
