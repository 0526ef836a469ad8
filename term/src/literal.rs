//! Primitive values, i.e. values that are represented by a single RDF literal.
//!
//! [`Literal`] is the closed set of primitive values handled by the mapper,
//! and [`PrimitiveType`] the corresponding set of parsers.

use super::*;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;
use std::hash::{Hash, Hasher};
use url::Url;

/// The types of primitive values.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialOrd, PartialEq)]
pub enum PrimitiveType {
    /// `xsd:string`
    String,
    /// `xsd:boolean`
    Boolean,
    /// `xsd:short`
    Short,
    /// `xsd:int`
    Int,
    /// `xsd:long`
    Long,
    /// `xsd:float`
    Float,
    /// `xsd:double`
    Double,
    /// `xsd:dateTime`
    Date,
    /// `xsd:anyURI`
    Url,
}

impl PrimitiveType {
    /// All primitive types.
    pub const ALL: [PrimitiveType; 9] = [
        PrimitiveType::String,
        PrimitiveType::Boolean,
        PrimitiveType::Short,
        PrimitiveType::Int,
        PrimitiveType::Long,
        PrimitiveType::Float,
        PrimitiveType::Double,
        PrimitiveType::Date,
        PrimitiveType::Url,
    ];

    /// The name under which this type is known to the mapper.
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::String => "string",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::Date => "date",
            PrimitiveType::Url => "url",
        }
    }

    /// Retrieve a primitive type by [name](PrimitiveType::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// The XSD datatype of the literals representing values of this type.
    pub fn datatype(self) -> &'static str {
        match self {
            PrimitiveType::String => ns::xsd::string,
            PrimitiveType::Boolean => ns::xsd::boolean,
            PrimitiveType::Short => ns::xsd::short,
            PrimitiveType::Int => ns::xsd::int,
            PrimitiveType::Long => ns::xsd::long,
            PrimitiveType::Float => ns::xsd::float,
            PrimitiveType::Double => ns::xsd::double,
            PrimitiveType::Date => ns::xsd::dateTime,
            PrimitiveType::Url => ns::xsd::anyURI,
        }
    }

    /// Retrieve the primitive type corresponding to a datatype IRI.
    ///
    /// `xsd:integer` is read as [`PrimitiveType::Long`].
    pub fn from_datatype(datatype: &str) -> Option<Self> {
        if datatype == ns::xsd::integer {
            return Some(PrimitiveType::Long);
        }
        Self::ALL.into_iter().find(|t| t.datatype() == datatype)
    }

    /// Parse `lexical` as a value of this type.
    pub fn parse(self, lexical: &str) -> Result<Literal> {
        let lit = match self {
            PrimitiveType::String => Literal::String(lexical.to_string()),
            PrimitiveType::Boolean => match lexical {
                "true" | "1" => Literal::Boolean(true),
                "false" | "0" => Literal::Boolean(false),
                _ => return Err(self.invalid(lexical, "expected true, false, 1 or 0")),
            },
            PrimitiveType::Short => {
                Literal::Short(lexical.parse().map_err(|e| self.invalid(lexical, e))?)
            }
            PrimitiveType::Int => {
                Literal::Int(lexical.parse().map_err(|e| self.invalid(lexical, e))?)
            }
            PrimitiveType::Long => {
                Literal::Long(lexical.parse().map_err(|e| self.invalid(lexical, e))?)
            }
            PrimitiveType::Float => Literal::Float(match xsd_special_float(lexical) {
                Some(f) => f as f32,
                None => lexical.parse().map_err(|e| self.invalid(lexical, e))?,
            }),
            PrimitiveType::Double => Literal::Double(match xsd_special_float(lexical) {
                Some(f) => f,
                None => lexical.parse().map_err(|e| self.invalid(lexical, e))?,
            }),
            PrimitiveType::Date => Literal::Date(
                DateTime::parse_from_rfc3339(lexical)
                    .map_err(|e| self.invalid(lexical, e))?
                    .with_timezone(&Utc),
            ),
            PrimitiveType::Url => {
                Literal::Url(Url::parse(lexical).map_err(|e| self.invalid(lexical, e))?)
            }
        };
        Ok(lit)
    }

    /// Convert `value` into a value of this type.
    ///
    /// Values of another primitive type are converted through their lexical form,
    /// `null` is preserved.
    pub fn coerce(self, value: &Literal) -> Result<Literal> {
        match value.primitive_type() {
            None => Ok(Literal::Null),
            Some(t) if t == self => Ok(value.clone()),
            Some(_) => self.parse(&value.lexical_form()),
        }
    }

    fn invalid<E>(self, lexical: &str, err: E) -> TermError
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        TermError::InvalidLexicalValue {
            lex: lexical.to_string(),
            dt: self.datatype().to_string(),
            source: err.into(),
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn xsd_special_float(lexical: &str) -> Option<f64> {
    match lexical {
        "INF" | "+INF" => Some(f64::INFINITY),
        "-INF" => Some(f64::NEG_INFINITY),
        "NaN" => Some(f64::NAN),
        _ => None,
    }
}

fn xsd_float_lexical<F>(f: F) -> String
where
    F: Copy + Into<f64> + fmt::Display,
{
    let wide: f64 = f.into();
    if wide.is_nan() {
        "NaN".to_string()
    } else if wide.is_infinite() {
        let lexical = if wide > 0.0 { "INF" } else { "-INF" };
        lexical.to_string()
    } else {
        f.to_string()
    }
}

/// A primitive value.
///
/// [`Literal::Null`] is the reserved null sentinel:
/// it is represented by the literal `"null"^^bean:Null`,
/// never by the absence of a value.
///
/// Equality and hashing are structural
/// (floating point numbers are compared by their bit pattern).
#[derive(Clone, Debug)]
pub enum Literal {
    /// The null sentinel
    Null,
    /// A string
    String(String),
    /// A boolean
    Boolean(bool),
    /// A 16-bit integer
    Short(i16),
    /// A 32-bit integer
    Int(i32),
    /// A 64-bit integer
    Long(i64),
    /// A single precision float
    Float(f32),
    /// A double precision float
    Double(f64),
    /// A UTC timestamp
    Date(DateTime<Utc>),
    /// A URL
    Url(Url),
}

impl Literal {
    /// Build a literal from its lexical form and its datatype IRI.
    ///
    /// Fails for any datatype outside the fixed set of [primitive types](PrimitiveType),
    /// except for `bean:Null` and `rdf:langString`.
    pub fn from_lexical(lexical: &str, datatype: &str) -> Result<Self> {
        if datatype == ns::bean::Null {
            return Ok(Literal::Null);
        }
        if datatype == ns::rdf::langString {
            return Ok(Literal::String(lexical.to_string()));
        }
        match PrimitiveType::from_datatype(datatype) {
            Some(t) => t.parse(lexical),
            None => Err(TermError::UnsupportedDatatype(datatype.to_string())),
        }
    }

    /// The type of this value, or `None` for [`Literal::Null`].
    pub fn primitive_type(&self) -> Option<PrimitiveType> {
        match self {
            Literal::Null => None,
            Literal::String(_) => Some(PrimitiveType::String),
            Literal::Boolean(_) => Some(PrimitiveType::Boolean),
            Literal::Short(_) => Some(PrimitiveType::Short),
            Literal::Int(_) => Some(PrimitiveType::Int),
            Literal::Long(_) => Some(PrimitiveType::Long),
            Literal::Float(_) => Some(PrimitiveType::Float),
            Literal::Double(_) => Some(PrimitiveType::Double),
            Literal::Date(_) => Some(PrimitiveType::Date),
            Literal::Url(_) => Some(PrimitiveType::Url),
        }
    }

    /// Whether this is the null sentinel.
    pub fn is_null(&self) -> bool {
        matches!(self, Literal::Null)
    }

    /// The datatype IRI of the RDF literal representing this value.
    pub fn datatype(&self) -> &'static str {
        match self.primitive_type() {
            Some(t) => t.datatype(),
            None => ns::bean::Null,
        }
    }

    /// The lexical form of the RDF literal representing this value.
    pub fn lexical_form(&self) -> String {
        match self {
            Literal::Null => "null".to_string(),
            Literal::String(s) => s.clone(),
            Literal::Boolean(b) => b.to_string(),
            Literal::Short(i) => i.to_string(),
            Literal::Int(i) => i.to_string(),
            Literal::Long(i) => i.to_string(),
            Literal::Float(f) => xsd_float_lexical(*f),
            Literal::Double(f) => xsd_float_lexical(*f),
            Literal::Date(d) => d.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            Literal::Url(u) => u.to_string(),
        }
    }

    /// The text of this value if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::String(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        use Literal::*;
        match (self, other) {
            (Null, Null) => true,
            (String(a), String(b)) => a == b,
            (Boolean(a), Boolean(b)) => a == b,
            (Short(a), Short(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Long(a), Long(b)) => a == b,
            (Float(a), Float(b)) => a.to_bits() == b.to_bits(),
            (Double(a), Double(b)) => a.to_bits() == b.to_bits(),
            (Date(a), Date(b)) => a == b,
            (Url(a), Url(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Literal {}

impl Hash for Literal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Literal::Null => (),
            Literal::String(s) => s.hash(state),
            Literal::Boolean(b) => b.hash(state),
            Literal::Short(i) => i.hash(state),
            Literal::Int(i) => i.hash(state),
            Literal::Long(i) => i.hash(state),
            Literal::Float(f) => f.to_bits().hash(state),
            Literal::Double(f) => f.to_bits().hash(state),
            Literal::Date(d) => d.hash(state),
            Literal::Url(u) => u.hash(state),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lexical_form())
    }
}

macro_rules! literal_from {
    ($rust_type:ty, $variant:ident) => {
        impl From<$rust_type> for Literal {
            fn from(value: $rust_type) -> Self {
                Literal::$variant(value)
            }
        }
    };
}

literal_from!(String, String);
literal_from!(bool, Boolean);
literal_from!(i16, Short);
literal_from!(i32, Int);
literal_from!(i64, Long);
literal_from!(f32, Float);
literal_from!(f64, Double);
literal_from!(DateTime<Utc>, Date);
literal_from!(Url, Url);

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}
