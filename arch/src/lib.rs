pub mod mnemonic;
pub mod mode;
pub mod table;
