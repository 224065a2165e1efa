use thiserror::Error;

#[derive(Debug, Error)]
pub enum EagleError {
    #[error("failed to parse XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("missing element <{0}>")]
    MissingElement(&'static str),

    #[error("<{element}> is missing required attribute \"{attr}\"")]
    MissingAttribute {
        element: &'static str,
        attr: &'static str,
    },

    #[error("invalid number \"{value}\" in <{element}> attribute \"{attr}\"")]
    InvalidNumber {
        element: &'static str,
        attr: &'static str,
        value: String,
    },

    #[error("invalid rotation \"{value}\"")]
    InvalidRotation { value: String },

    #[error("<{element}> has \"{present}\" without \"{missing}\"")]
    MalformedGeometry {
        element: &'static str,
        present: &'static str,
        missing: &'static str,
    },

    #[error("unsupported <{child}> inside <{parent}>")]
    UnsupportedChild {
        parent: &'static str,
        child: String,
    },
}
