//! Writes and parses [JSON](https://json.org/).

mod cursor;

mod parser;
pub use self::parser::Parser;

mod value;
pub use self::value::Number;
pub use self::value::Value;

mod writer;
pub use self::writer::JsonWriter;
