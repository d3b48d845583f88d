use uuid::Uuid;

/// Record carrying a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Record carrying a human-readable name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Record that can describe itself in one line for UIs and logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Finds the record carrying `id`.
pub fn find_by_id<T: Identifiable>(items: &[T], id: Uuid) -> Option<&T> {
    items.iter().find(|item| item.id() == id)
}

/// Mutable variant of [`find_by_id`].
pub fn find_by_id_mut<T: Identifiable>(items: &mut [T], id: Uuid) -> Option<&mut T> {
    items.iter_mut().find(|item| item.id() == id)
}

/// Orders borrowed records by name for listing views.
pub fn sort_by_name<T: NamedEntity>(items: &mut [&T]) {
    items.sort_by(|a, b| a.name().cmp(b.name()));
}

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use chrono;
pub use serde;
pub use uuid;
