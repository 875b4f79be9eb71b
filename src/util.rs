pub(crate) mod runtime;
pub(crate) mod str;
pub(crate) mod sync;
pub(crate) mod uri;
pub(crate) mod utf;

pub(crate) use self::str::{StrExt, StringExt};

pub trait Sealed {}
