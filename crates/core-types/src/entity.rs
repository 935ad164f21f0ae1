/// Common shape of every entity stored through the generic repository.
///
/// An entity is identified by a database-generated `i64` and written through
/// a separate payload type that carries every column except the id.
pub trait BaseEntity: Clone + Send + Sync + Unpin + 'static {
    /// The write model: all fields of the entity except its id.
    type Payload: Clone + Send + Sync + 'static;

    fn id(&self) -> i64;

    /// Reassembles an entity from a stored id and its field values.
    fn from_parts(id: i64, payload: Self::Payload) -> Self;
}
