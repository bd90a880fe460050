//! String-keyed enumerations with an open fallback.
//!
//! The API documents a closed set of values for each of these fields, but the
//! upstream data source occasionally emits codes we do not know about. Known
//! values map onto named variants; anything else is preserved in `Other` and
//! written back out unchanged.

use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::openapi::schema::{ObjectBuilder, Schema, Type};
use utoipa::openapi::RefOr;

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => ($wire:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
            /// A value outside the documented set, kept verbatim.
            Other(String),
        }

        impl $name {
            /// Wire representation of this value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $wire,)+
                    Self::Other(raw) => raw,
                }
            }

            /// Human-readable Portuguese label.
            #[must_use]
            pub fn label(&self) -> &str {
                match self {
                    $(Self::$variant => $label,)+
                    Self::Other(raw) => raw,
                }
            }

            /// Whether the value belongs to the documented set.
            #[must_use]
            pub const fn is_known(&self) -> bool {
                !matches!(self, Self::Other(_))
            }
        }

        impl FromStr for $name {
            type Err = Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(match s {
                    $($wire => Self::$variant,)+
                    other => Self::Other(other.to_string()),
                })
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                match s.parse::<Self>() {
                    Ok(value) => value,
                    Err(never) => match never {},
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                Ok(Self::from(raw.as_str()))
            }
        }

        impl utoipa::PartialSchema for $name {
            fn schema() -> RefOr<Schema> {
                let known = [$($wire),+].join(", ");
                RefOr::T(Schema::Object(
                    ObjectBuilder::new()
                        .schema_type(Type::String)
                        .description(Some(format!(
                            "One of: {known}. Unknown values are passed through."
                        )))
                        .build(),
                ))
            }
        }

        impl utoipa::ToSchema for $name {
            fn name() -> Cow<'static, str> {
                Cow::Borrowed(stringify!($name))
            }
        }
    };
}

string_enum! {
    /// How a single deputy voted.
    TipoVoto {
        Sim => ("SIM", "Sim"),
        Nao => ("NAO", "Não"),
        Abstencao => ("ABSTENCAO", "Abstenção"),
        Obstrucao => ("OBSTRUCAO", "Obstrução"),
    }
}

string_enum! {
    /// Outcome of a vote session.
    ResultadoVotacao {
        Aprovado => ("APROVADO", "Aprovado"),
        Rejeitado => ("REJEITADO", "Rejeitado"),
    }
}

string_enum! {
    /// Legislative bill type code.
    TipoProposicao {
        Pl => ("PL", "Projeto de Lei"),
        Pec => ("PEC", "Proposta de Emenda à Constituição"),
        Mpv => ("MPV", "Medida Provisória"),
        Plp => ("PLP", "Projeto de Lei Complementar"),
        Pdl => ("PDL", "Projeto de Decreto Legislativo"),
    }
}

string_enum! {
    /// Who assigned a civic category to a proposition.
    OrigemClassificacao {
        Manual => ("manual", "Manual"),
        Automatica => ("automatica", "Automática"),
    }
}
