use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse_macro_input, FnArg, GenericArgument, ItemFn, PatType, PathArguments, Type,
};

#[derive(Clone, Copy, PartialEq)]
enum Param {
    Required,
    Optional,
}

fn classify(ty: &Type) -> Option<Param> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    match segment.ident.to_string().as_str() {
        "f64" => Some(Param::Required),
        "Option" => match &segment.arguments {
            PathArguments::AngleBracketed(generic) => match generic.args.first() {
                Some(GenericArgument::Type(inner)) if classify(inner) == Some(Param::Required) => {
                    Some(Param::Optional)
                }
                _ => None,
            },
            _ => None,
        },
        _ => None,
    }
}

fn compile_error<T: quote::ToTokens>(tokens: T, message: &str) -> TokenStream {
    syn::Error::new_spanned(tokens, message)
        .to_compile_error()
        .into()
}

/// Turns `fn name(x: f64, precision: Option<f64>) -> Result<f64, CalcError>` into a
/// whitelist entry `fn name(args: &[f64]) -> Result<f64, CalcError>` that checks the
/// argument count before binding the parameters.
///
/// Required `f64` parameters must come before any trailing `Option<f64>` ones.
#[proc_macro_attribute]
pub fn calc_fn(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    let attrs = &input.attrs;
    let vis = &input.vis;
    let fn_name = &input.sig.ident;
    let fn_body = &input.block;
    let fn_output = &input.sig.output;

    let mut bindings = Vec::new();
    let mut min_args = 0usize;
    let mut seen_optional = false;

    for (i, arg) in input.sig.inputs.iter().enumerate() {
        let FnArg::Typed(PatType { pat, ty, .. }) = arg else {
            return compile_error(arg, "calc_fn functions cannot take `self`");
        };
        let arg_name = match **pat {
            syn::Pat::Ident(ref ident) => &ident.ident,
            _ => return compile_error(pat, "calc_fn parameters must be plain identifiers"),
        };

        match classify(ty) {
            Some(Param::Required) => {
                if seen_optional {
                    return compile_error(
                        ty,
                        "required parameters must precede optional ones",
                    );
                }
                min_args += 1;
                bindings.push(quote! {
                    let #arg_name: f64 = args[#i];
                });
            }
            Some(Param::Optional) => {
                seen_optional = true;
                bindings.push(quote! {
                    let #arg_name: Option<f64> = args.get(#i).copied();
                });
            }
            None => return compile_error(ty, "calc_fn parameters must be `f64` or `Option<f64>`"),
        }
    }

    let max_args = input.sig.inputs.len();
    let name = fn_name.to_string();
    let expanded = quote! {
        #(#attrs)*
        #vis fn #fn_name(args: &[f64]) #fn_output {
            if args.len() < #min_args || args.len() > #max_args {
                return Err(crate::error::CalcError::Arity {
                    function: #name.to_string(),
                    min: #min_args,
                    max: #max_args,
                    found: args.len(),
                });
            }

            #(#bindings)*

            #fn_body
        }
    };

    TokenStream::from(expanded)
}
