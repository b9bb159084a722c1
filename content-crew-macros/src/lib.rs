use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse_macro_input, Attribute, Data, DeriveInput, Expr, Fields, GenericArgument, LitStr,
    PathArguments, Token, Type,
};

/// Derives `content_crew_sdk::WorkflowDefinition` for a clap argument struct.
///
/// The struct carries `#[workflow(id = "...", name = "...", description = "...")]`.
/// Each field may carry `#[field(label = "...", description = "...", type = "...")]`
/// where `type` is one of `text`, `select`, `number`, `file_path` or `flag`.
/// `select` takes `options = "a,b,c"`, `number` takes `min`/`max`, `file_path`
/// takes `pattern`. `#[field(skip)]` leaves a field out of the schema.
///
/// The CLI flag and default value are read from the field's `#[arg(...)]`.
#[proc_macro_derive(WorkflowDefinition, attributes(workflow, field))]
pub fn derive_workflow_definition(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let workflow = WorkflowMeta::from_attrs(input)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new(
                    input.ident.span(),
                    "WorkflowDefinition requires a struct with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new(
                input.ident.span(),
                "WorkflowDefinition can only be derived for structs",
            ))
        }
    };

    let mut schemas = Vec::new();
    for field in fields {
        let meta = FieldMeta::from_attrs(&field.attrs)?;
        if meta.skip {
            continue;
        }

        let name = match &field.ident {
            Some(ident) => ident.to_string(),
            None => continue,
        };
        let cli = CliArg::from_attrs(&field.attrs, &name);

        let field_type = match meta.field_type()? {
            Some(tokens) => tokens,
            None => infer_field_type(&field.ty),
        };
        let required =
            option_inner(&field.ty).is_none() && !is_bool(&field.ty) && cli.default_value.is_none();
        let label = meta.label.clone().unwrap_or_else(|| name.clone());
        let description = meta.description.clone().unwrap_or_default();
        let cli_arg = cli.flag;
        let default = match &cli.default_value {
            Some(value) => quote! { Some(::std::string::ToString::to_string(&#value)) },
            None => quote! { None },
        };

        schemas.push(quote! {
            content_crew_sdk::FieldSchema {
                name: #name.to_string(),
                field_type: #field_type,
                label: #label.to_string(),
                description: #description.to_string(),
                cli_arg: #cli_arg.to_string(),
                required: #required,
                default: #default,
            }
        });
    }

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let WorkflowMeta {
        id,
        name,
        description,
    } = workflow;

    Ok(quote! {
        impl #impl_generics content_crew_sdk::WorkflowDefinition for #ident #ty_generics #where_clause {
            fn metadata() -> content_crew_sdk::WorkflowMetadata {
                content_crew_sdk::WorkflowMetadata {
                    id: #id.to_string(),
                    name: #name.to_string(),
                    description: #description.to_string(),
                }
            }

            fn fields() -> ::std::vec::Vec<content_crew_sdk::FieldSchema> {
                vec![#(#schemas),*]
            }
        }
    })
}

struct WorkflowMeta {
    id: String,
    name: String,
    description: String,
}

impl WorkflowMeta {
    fn from_attrs(input: &DeriveInput) -> syn::Result<Self> {
        let attr = input
            .attrs
            .iter()
            .find(|attr| attr.path().is_ident("workflow"))
            .ok_or_else(|| {
                syn::Error::new(input.ident.span(), "missing #[workflow(...)] attribute")
            })?;

        let mut id = None;
        let mut name = None;
        let mut description = String::new();

        attr.parse_nested_meta(|meta| {
            let value: LitStr = meta.value()?.parse()?;
            if meta.path.is_ident("id") {
                id = Some(value.value());
            } else if meta.path.is_ident("name") {
                name = Some(value.value());
            } else if meta.path.is_ident("description") {
                description = value.value();
            } else {
                return Err(meta.error("expected `id`, `name` or `description`"));
            }
            Ok(())
        })?;

        let id = id.ok_or_else(|| syn::Error::new_spanned(attr, "#[workflow] needs an `id`"))?;
        let name = name.unwrap_or_else(|| id.clone());

        Ok(Self {
            id,
            name,
            description,
        })
    }
}

#[derive(Default)]
struct FieldMeta {
    label: Option<String>,
    description: Option<String>,
    kind: Option<LitStr>,
    options: Option<String>,
    min: Option<i64>,
    max: Option<i64>,
    pattern: Option<String>,
    skip: bool,
}

impl FieldMeta {
    fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut meta = FieldMeta::default();

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("field")) {
            attr.parse_nested_meta(|nested| {
                if nested.path.is_ident("skip") {
                    meta.skip = true;
                    return Ok(());
                }

                let value: LitStr = nested.value()?.parse()?;
                if nested.path.is_ident("label") {
                    meta.label = Some(value.value());
                } else if nested.path.is_ident("description") {
                    meta.description = Some(value.value());
                } else if nested.path.is_ident("type") {
                    meta.kind = Some(value);
                } else if nested.path.is_ident("options") {
                    meta.options = Some(value.value());
                } else if nested.path.is_ident("pattern") {
                    meta.pattern = Some(value.value());
                } else if nested.path.is_ident("min") {
                    meta.min = Some(parse_int(&value)?);
                } else if nested.path.is_ident("max") {
                    meta.max = Some(parse_int(&value)?);
                } else {
                    return Err(nested.error("unsupported #[field] key"));
                }
                Ok(())
            })?;
        }

        Ok(meta)
    }

    fn field_type(&self) -> syn::Result<Option<TokenStream2>> {
        let Some(kind) = &self.kind else {
            return Ok(None);
        };

        let tokens = match kind.value().as_str() {
            "text" => quote! { content_crew_sdk::FieldType::Text },
            "flag" => quote! { content_crew_sdk::FieldType::Flag },
            "number" => {
                let min = optional_int(self.min);
                let max = optional_int(self.max);
                quote! { content_crew_sdk::FieldType::Number { min: #min, max: #max } }
            }
            "file_path" => {
                let pattern = match &self.pattern {
                    Some(pattern) => quote! { Some(#pattern.to_string()) },
                    None => quote! { None },
                };
                quote! { content_crew_sdk::FieldType::FilePath { pattern: #pattern } }
            }
            "select" => {
                let options: Vec<String> = self
                    .options
                    .as_deref()
                    .unwrap_or_default()
                    .split(',')
                    .map(|option| option.trim().to_string())
                    .filter(|option| !option.is_empty())
                    .collect();
                if options.is_empty() {
                    return Err(syn::Error::new(
                        kind.span(),
                        "select fields need `options = \"a,b,c\"`",
                    ));
                }
                quote! {
                    content_crew_sdk::FieldType::Select {
                        options: vec![#(#options.to_string()),*],
                    }
                }
            }
            other => {
                return Err(syn::Error::new(
                    kind.span(),
                    format!("unknown field type `{}`", other),
                ))
            }
        };

        Ok(Some(tokens))
    }
}

fn parse_int(value: &LitStr) -> syn::Result<i64> {
    value
        .value()
        .parse()
        .map_err(|_| syn::Error::new(value.span(), "expected an integer"))
}

fn optional_int(value: Option<i64>) -> TokenStream2 {
    match value {
        Some(value) => quote! { Some(#value) },
        None => quote! { None },
    }
}

/// The subset of clap's `#[arg(...)]` that the schema cares about.
struct CliArg {
    flag: String,
    /// A literal or a path to a `&str` constant
    default_value: Option<Expr>,
}

impl CliArg {
    fn from_attrs(attrs: &[Attribute], field_name: &str) -> Self {
        let mut long = None;
        let mut default_value = None;

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("arg")) {
            // clap validates its own attribute; anything unparseable here is skipped.
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("long") {
                    if meta.input.peek(Token![=]) {
                        let value: LitStr = meta.value()?.parse()?;
                        long = Some(value.value());
                    } else {
                        long = Some(field_name.replace('_', "-"));
                    }
                } else if meta.path.is_ident("default_value")
                    || meta.path.is_ident("default_value_t")
                {
                    let value: Expr = meta.value()?.parse()?;
                    default_value = Some(value);
                } else if meta.input.peek(Token![=]) {
                    let _: Expr = meta.value()?.parse()?;
                }
                Ok(())
            });
        }

        let long = long.unwrap_or_else(|| field_name.replace('_', "-"));
        Self {
            flag: format!("--{}", long),
            default_value,
        }
    }
}

fn infer_field_type(ty: &Type) -> TokenStream2 {
    let ty = option_inner(ty).unwrap_or(ty);
    match last_segment(ty).as_deref() {
        Some("bool") => quote! { content_crew_sdk::FieldType::Flag },
        Some("PathBuf") => quote! { content_crew_sdk::FieldType::FilePath { pattern: None } },
        Some("usize" | "u8" | "u16" | "u32" | "u64" | "i32" | "i64") => {
            quote! { content_crew_sdk::FieldType::Number { min: None, max: None } }
        }
        _ => quote! { content_crew_sdk::FieldType::Text },
    }
}

fn last_segment(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string()),
        _ => None,
    }
}

fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    match &segment.arguments {
        PathArguments::AngleBracketed(args) => match args.args.first()? {
            GenericArgument::Type(inner) => Some(inner),
            _ => None,
        },
        _ => None,
    }
}

fn is_bool(ty: &Type) -> bool {
    last_segment(ty).as_deref() == Some("bool")
}
