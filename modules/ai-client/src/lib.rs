mod analyst;
mod openai;

pub use analyst::ContractAnalyst;
