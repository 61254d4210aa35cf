/// Errors reported by the operations of a [`RotatableController`](crate::character::RotatableController).
///
/// A failing operation leaves the controller unchanged, except for the geometry setters which
/// store their new value before pushing it to the proxy body.
#[derive(thiserror::Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum ControllerError {
    /// The descriptor used to build the controller is invalid.
    ///
    /// See [`RotatableControllerDesc::is_valid`](crate::character::RotatableControllerDesc::is_valid).
    #[error("the controller descriptor is invalid")]
    InvalidDescriptor,
    /// The backend could not create the proxy body or its initial shape.
    #[error("the proxy body of the controller could not be created")]
    ProxyCreationFailed,
    /// The controller has no proxy body, or the backend no longer knows about it.
    #[error("the controller has no proxy body")]
    MissingProxyBody,
    /// The proxy body was expected to carry exactly one shape.
    #[error("the proxy body carries {0} shapes instead of exactly one")]
    UnexpectedShapeCount(usize),
    /// The proxy shape was expected to have exactly one material.
    #[error("the proxy shape has {0} materials instead of exactly one")]
    UnexpectedMaterialCount(usize),
    /// The backend could not create the replacement proxy shape.
    #[error("the replacement proxy shape could not be created")]
    ShapeCreationFailed,
    /// The filter data of the current proxy shape could not be copied to its replacement.
    #[error("the filter data could not be copied to the replacement proxy shape")]
    FilterCopyFailed,
    /// The backend could not detach the proxy shape being replaced.
    #[error("the previous proxy shape could not be detached")]
    ShapeDetachFailed,
    /// The backend refused the new proxy geometry.
    #[error("the proxy body refused the new geometry")]
    GeometryRejected,
    /// The given raw value does not name a climbing mode.
    #[error("{0} is not a valid climbing mode")]
    InvalidClimbingMode(u32),
}
