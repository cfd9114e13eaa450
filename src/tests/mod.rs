pub(crate) mod support;

mod engine;
