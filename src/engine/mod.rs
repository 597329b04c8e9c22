mod eval;

pub use eval::{Backend, EngineMeta, EvalEngine};
