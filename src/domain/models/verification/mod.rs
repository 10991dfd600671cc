pub mod code_purpose;

pub use code_purpose::CodePurpose;
