use syn::{Error, LitStr};

/// How field names become JSON keys when no `rename` is given.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) enum RenameRule {
    #[default]
    None,
    PascalCase,
    CamelCase,
    SnakeCase,
}

impl RenameRule {
    fn from_lit(lit: &LitStr) -> Result<Self, Error> {
        match lit.value().as_str() {
            "PascalCase" => Ok(Self::PascalCase),
            "camelCase" => Ok(Self::CamelCase),
            "snake_case" => Ok(Self::SnakeCase),
            other => Err(Error::new_spanned(
                lit,
                format!(
                    "unknown rename_all rule {:?}, expected \"PascalCase\", \"camelCase\" or \"snake_case\"",
                    other
                ),
            )),
        }
    }

    /// Applies the rule to a snake_case field name.
    pub(crate) fn apply(self, field: &str) -> String {
        match self {
            Self::None | Self::SnakeCase => field.to_owned(),
            Self::PascalCase => field.split('_').map(capitalize).collect(),
            Self::CamelCase => {
                let pascal: String = field.split('_').map(capitalize).collect();
                let mut chars = pascal.chars();

                match chars.next() {
                    Some(first) => first.to_lowercase().chain(chars).collect(),
                    None => pascal,
                }
            }
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Default)]
pub(crate) struct ContainerAttrs {
    pub rename_all: RenameRule,
}

impl ContainerAttrs {
    pub(crate) fn parse(attrs: &[syn::Attribute]) -> Result<Self, Error> {
        let mut out = Self::default();

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("json")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename_all") {
                    out.rename_all = RenameRule::from_lit(&meta.value()?.parse()?)?;
                    Ok(())
                } else {
                    Err(meta.error("unsupported json container attribute"))
                }
            })?;
        }

        Ok(out)
    }
}

#[derive(Default)]
pub(crate) struct FieldAttrs {
    pub rename: Option<LitStr>,
    pub skip: bool,
}

impl FieldAttrs {
    pub(crate) fn parse(attrs: &[syn::Attribute]) -> Result<Self, Error> {
        let mut out = Self::default();

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("json")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    out.rename = Some(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    out.skip = true;
                    Ok(())
                } else {
                    Err(meta.error("unsupported json field attribute"))
                }
            })?;
        }

        Ok(out)
    }
}
