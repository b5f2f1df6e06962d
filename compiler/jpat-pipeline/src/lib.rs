//! jpat pipeline: the settings of a run, command line parsing, loading of
//! JSON workspaces and checking every switch of a workspace.

pub mod args;
pub mod error;
pub mod interface;
pub mod settings;
pub mod workspace;
