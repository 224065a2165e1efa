use matrixgen_grid::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatrixError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(
        "{role} group \"{name}\" has no {counterpart} group matching stem \"{stem}\""
    )]
    UnmatchedRolePair {
        name: String,
        stem: String,
        role: &'static str,
        counterpart: &'static str,
    },

    #[error(
        "{kind} \"{group}\" references template entity \"{target}\" that classification never found"
    )]
    DanglingTemplateReference {
        kind: &'static str,
        group: String,
        target: String,
    },
}
