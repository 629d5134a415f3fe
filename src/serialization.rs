//! Serialization of fitted parameters.
//!
//! Fitted components expose a plain-data parameter struct (vectors, maps,
//! scalars) rather than their in-memory form. Anything that is
//! `Serialize + Deserialize` gets a bincode encoding through the blanket impl.

use std::error::Error;
use std::path::Path;

/// A parameter representation that can be serialized to and from bytes.
pub trait SerializableParams: Sized {
    /// The error type returned during (de)serialization.
    type Error: Error + Send + Sync + 'static;

    /// Serialize the parameters into a byte buffer.
    fn to_bytes(&self) -> Result<Vec<u8>, Self::Error>;

    /// Deserialize the parameters from a byte buffer.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error>;
}

impl<T> SerializableParams for T
where
    T: serde::Serialize + for<'de> serde::Deserialize<'de>,
{
    type Error = bincode::Error;

    fn to_bytes(&self) -> Result<Vec<u8>, Self::Error> {
        bincode::serialize(self)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error> {
        bincode::deserialize(bytes)
    }
}

/// Encode `params` and write them to `path`, replacing any existing file.
pub(crate) fn write_params<P: SerializableParams>(params: &P, path: &Path) -> crate::Result<()> {
    let bytes = params
        .to_bytes()
        .map_err(|e| crate::Error::SerializationFailure(e.to_string()))?;
    std::fs::write(path, bytes)
        .map_err(|e| crate::Error::SerializationFailure(format!("{}: {e}", path.display())))
}

/// Read and decode parameters previously written by [`write_params`].
pub(crate) fn read_params<P: SerializableParams>(path: &Path) -> crate::Result<P> {
    let bytes = std::fs::read(path)
        .map_err(|e| crate::Error::SerializationFailure(format!("{}: {e}", path.display())))?;
    P::from_bytes(&bytes).map_err(|e| crate::Error::SerializationFailure(e.to_string()))
}
