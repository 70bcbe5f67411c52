pub mod atype;
