mod walk;

pub use walk::{collect_photos, PHOTO_EXTENSIONS, SORTED_EXTENSIONS};
