//! JavaScript config literals: evaluation to plain data and serialization
//! back to source.

pub mod errors;
pub mod evaluator;
pub mod parser;
pub mod serializer;
pub mod value;

pub use errors::EvalError;
pub use evaluator::{
    EVALUATION_TIMEOUT, evaluate_config_source, evaluate_source, extract_export_expression,
};
pub use parser::{MAX_DEPTH, parse_expression};
pub use serializer::{format_number, serialize, to_module_source};
pub use value::{Object, Value};
