mod cursor;
mod resolver;

pub use cursor::IconCursor;
pub use resolver::{
    backup_favicon_url, default_icon_uri, domain_of, favicon_url, resolve, IconCandidate,
    IconResolution, IconSpec, FAVICON_SIZE,
};
