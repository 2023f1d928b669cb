/// A table-backed entity whose SELECT projection is derived from its column list.
pub trait Entity: Send + Sync + Unpin + 'static {
    fn table_name() -> &'static str;

    fn id_column() -> &'static str {
        "id"
    }

    /// Columns in projection order; the id column included.
    fn columns() -> &'static [&'static str];
}
