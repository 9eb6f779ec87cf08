#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Invalid startup parameters.
    Configuration,
    /// A mesh or texture could not be read or understood.
    Asset,
    /// The GPU device rejected a resource or failed outright.
    Device,
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, message: String) -> Self {
        Self { kind, message }
    }

    pub fn configuration(message: String) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    pub fn asset(message: String) -> Self {
        Self::new(ErrorKind::Asset, message)
    }

    pub fn device(message: String) -> Self {
        Self::new(ErrorKind::Device, message)
    }

    #[cfg(test)]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            ErrorKind::Configuration => "configuration error",
            ErrorKind::Asset => "asset error",
            ErrorKind::Device => "device error",
        };

        write!(f, "{kind}: {}", self.message)
    }
}

impl std::error::Error for Error {}
