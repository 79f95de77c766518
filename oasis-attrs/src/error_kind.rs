use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Data,
    DeriveInput,
    Error,
    Expr,
    Fields,
    Ident,
    Result,
    Token,
};

/// One `tag = expr` pair inside the `error` attribute.
enum Tag {
    Message(Expr),
    Labels(Expr),
    Help(Expr),
}

impl Parse for Tag {
    fn parse(input: ParseStream) -> Result<Self> {
        let name: Ident = input.parse()?;
        input.parse::<Token![=]>()?;
        let value: Expr = input.parse()?;

        match name.to_string().as_str() {
            "message" => Ok(Self::Message(value)),
            "labels" => Ok(Self::Labels(value)),
            "help" => Ok(Self::Help(value)),
            other => Err(Error::new_spanned(&name, format!("unknown tag `{}`", other))),
        }
    }
}

/// The contents of the `error` attribute.
#[derive(Default)]
struct ErrorTags {
    message: Option<Expr>,
    labels: Option<Expr>,
    help: Option<Expr>,
}

impl ErrorTags {
    /// Collects the tags from the `error` attribute of the item, if it has one.
    fn from_input(input: &DeriveInput) -> Result<Self> {
        let mut tags = Self::default();
        let Some(attr) = input.attrs.iter().find(|attr| attr.path().is_ident("error")) else {
            return Ok(tags);
        };

        let parsed = attr.parse_args_with(Punctuated::<Tag, Token![,]>::parse_terminated)?;
        for tag in parsed {
            let (slot, value, name) = match tag {
                Tag::Message(value) => (&mut tags.message, value, "message"),
                Tag::Labels(value) => (&mut tags.labels, value, "labels"),
                Tag::Help(value) => (&mut tags.help, value, "help"),
            };
            if slot.is_some() {
                return Err(Error::new_spanned(&value, format!("duplicate `{}` tag", name)));
            }
            *slot = Some(value);
        }

        Ok(tags)
    }
}

/// A `let` statement binding every named field of `self` by reference, so the tag expressions can
/// refer to fields by name.
fn bind_fields(name: &Ident, fields: &Fields) -> Result<TokenStream2> {
    match fields {
        Fields::Named(named) => {
            let idents = named.named.iter().map(|field| &field.ident);
            Ok(quote! {
                #[allow(unused_variables)]
                let #name { #(#idents),* } = self;
            })
        },
        Fields::Unit => Ok(TokenStream2::new()),
        Fields::Unnamed(_) => Err(Error::new_spanned(
            name,
            "`ErrorKind` cannot be derived for tuple structs",
        )),
    }
}

/// Generates the body of the `ErrorKind` implementation for the given struct.
pub fn expand(input: &DeriveInput) -> Result<TokenStream2> {
    let Data::Struct(data) = &input.data else {
        return Err(Error::new_spanned(&input.ident, "`ErrorKind` can only be derived for structs"));
    };

    let name = &input.ident;
    let bindings = bind_fields(name, &data.fields)?;
    let tags = ErrorTags::from_input(input)?;

    let message = match &tags.message {
        Some(message) => quote! { #message },
        None => {
            let fallback = name.to_string();
            quote! { #fallback }
        },
    };
    let labels = match &tags.labels {
        Some(labels) => quote! { #labels },
        None => quote! { [""] },
    };
    let help = tags.help.as_ref().map(|help| quote! { report.set_help(#help); });

    Ok(quote! {
        fn message(&self) -> String {
            #bindings
            (#message).to_string()
        }

        fn build_report<'a>(
            &self,
            src_id: &'a str,
            spans: &[std::ops::Range<usize>],
        ) -> ariadne::Report<(&'a str, std::ops::Range<usize>)> {
            #bindings
            let offset = spans.first().map_or(0, |span| span.start);
            let labels = #labels
                .into_iter()
                .zip(spans)
                .map(|(text, span)| {
                    let label = ariadne::Label::new((src_id, span.clone()))
                        .with_color(oasis_error::EXPR);
                    if text.is_empty() {
                        label
                    } else {
                        label.with_message(text)
                    }
                })
                .collect::<Vec<_>>();

            let mut report = ariadne::Report::build(ariadne::ReportKind::Error, src_id, offset)
                .with_message(#message)
                .with_labels(labels);
            #help
            report.finish()
        }
    })
}
