mod error_kind;

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Derives the [`ErrorKind`] trait for the given struct.
///
/// The information of the error can be customized using the `error` attribute by adding the
/// corresponding tags to it:
/// ```
/// use oasis_attrs::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(message = "cannot divide by zero", labels = ["this expression"])]
/// pub struct Foo;
/// ```
///
/// The following tags are available:
///
/// | Tag         | Description                                                                  |
/// | ----------- | ---------------------------------------------------------------------------- |
/// | `message`   | The message displayed at the top of the error when it is displayed.          |
/// | `labels`    | The texts of the labels that point to each span of the error, in order.      |
/// | `help`      | Optional help text for the error, describing what the user can do to fix it. |
///
/// Each tag accepts an expression (`labels` accepts an expression that can be iterated over).
/// For structs with named fields, the expression is evaluated with the members of the struct in
/// scope, so they can be used in the expression (tuple structs are not supported).
///
/// The generated implementation refers to the `oasis_error` and `ariadne` crates by name, so both
/// must be dependencies of the crate using the derive.
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let name = &input.ident;
    match error_kind::expand(&input) {
        Ok(body) => quote! {
            impl oasis_error::ErrorKind for #name {
                #body
            }
        }.into(),
        Err(err) => err.into_compile_error().into(),
    }
}
