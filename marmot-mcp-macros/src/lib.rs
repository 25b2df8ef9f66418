//! Procedural macros for marmot-mcp
//!
//! This crate provides the `#[gitlab_tool]` attribute macro for defining GitLab
//! MCP tools with minimal boilerplate.

use darling::{FromMeta, ast::NestedMeta};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{DeriveInput, parse_macro_input};

/// Arguments for the `#[gitlab_tool]` attribute
#[derive(Debug, FromMeta)]
struct GitLabToolArgs {
    /// Tool name (e.g., "create_issue")
    name: String,
    /// Tool description for MCP
    description: String,
    /// Operation kind: "read", "write", "delete", or "execute"
    operation: String,
}

/// Attribute macro for GitLab MCP tools.
///
/// This macro generates:
/// - `ToolInfo` trait implementation (name, description, operation kind)
/// - JSON Schema for input arguments via schemars
/// - A compile-time `inventory` registration entry, so the tool is picked up
///   by `ToolRegistry::discover` without an explicit register call
/// - Automatically adds `#[derive(Debug, Clone, serde::Deserialize, schemars::JsonSchema)]`
///
/// # Example
///
/// ```ignore
/// #[gitlab_tool(
///     name = "create_issue",
///     description = "Create a new issue in a GitLab project",
///     operation = "write"
/// )]
/// pub struct CreateIssue {
///     /// Project ID or URL-encoded path
///     pub project: String,
///     /// Issue title
///     pub title: String,
///     /// Issue description (optional)
///     #[serde(default)]
///     pub description: Option<String>,
/// }
///
/// #[async_trait]
/// impl ToolExecutor for CreateIssue {
///     async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
///         // Your implementation here
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn gitlab_tool(attr: TokenStream, item: TokenStream) -> TokenStream {
    let attr_args = match NestedMeta::parse_meta_list(attr.into()) {
        Ok(v) => v,
        Err(e) => return TokenStream::from(e.to_compile_error()),
    };

    let args = match GitLabToolArgs::from_list(&attr_args) {
        Ok(v) => v,
        Err(e) => return TokenStream::from(e.write_errors()),
    };

    let input = parse_macro_input!(item as DeriveInput);
    let expanded = impl_gitlab_tool(&args, &input);

    TokenStream::from(expanded)
}

fn impl_gitlab_tool(args: &GitLabToolArgs, input: &DeriveInput) -> TokenStream2 {
    let struct_name = &input.ident;
    let tool_name = &args.name;
    let description = &args.description;

    // Convert operation string to OperationKind variant
    let operation_variant = match args.operation.as_str() {
        "read" => quote! { crate::tools::OperationKind::Read },
        "write" => quote! { crate::tools::OperationKind::Write },
        "delete" => quote! { crate::tools::OperationKind::Delete },
        "execute" => quote! { crate::tools::OperationKind::Execute },
        other => {
            return syn::Error::new_spanned(
                input,
                format!(
                    "Unknown operation: {}. Use: read, write, delete, or execute",
                    other
                ),
            )
            .to_compile_error();
        }
    };

    let vis = &input.vis;
    let attrs: Vec<_> = input.attrs.iter().collect();
    let generics = &input.generics;

    // Extract fields from the struct
    let fields = match &input.data {
        syn::Data::Struct(data) => match &data.fields {
            syn::Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(
                    input,
                    "gitlab_tool only supports structs with named fields",
                )
                .to_compile_error();
            }
        },
        _ => {
            return syn::Error::new_spanned(input, "gitlab_tool only supports structs")
                .to_compile_error();
        }
    };

    let register_fn = format_ident!("__register_{}", tool_name);

    quote! {
        #(#attrs)*
        #[derive(Debug, Clone, serde::Deserialize, schemars::JsonSchema)]
        #vis struct #struct_name #generics {
            #fields
        }

        impl crate::tools::ToolInfo for #struct_name {
            fn name() -> &'static str {
                #tool_name
            }

            fn description() -> &'static str {
                #description
            }

            fn operation() -> crate::tools::OperationKind {
                #operation_variant
            }
        }

        const _: () = {
            fn #register_fn(registry: &mut crate::tools::ToolRegistry) {
                registry.register::<#struct_name>();
            }

            inventory::submit! {
                crate::tools::registry::ToolRegistration {
                    register_fn: #register_fn,
                }
            }
        };
    }
}
