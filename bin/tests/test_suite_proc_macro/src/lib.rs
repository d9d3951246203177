use quote::{format_ident, quote};
use syn::{parse_macro_input, LitStr};

/// Expands to one `#[test]` per `.toy` file below the given directory
/// (relative to `bin/tests`), each calling `toy_expect` on the file's contents.
#[proc_macro]
pub fn generate_tests(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let suite_dir = parse_macro_input!(input as LitStr).value();
    let root_dir = format!("{}/../{}", env!("CARGO_MANIFEST_DIR"), suite_dir);
    let tests: Vec<proc_macro2::TokenStream> = walkdir::WalkDir::new(root_dir.clone())
        .sort_by_file_name()
        .into_iter()
        .flatten()
        .filter(|entry| entry.path().extension() == Some("toy".as_ref()))
        .map(|entry| {
            let test_file_path = entry.path().to_string_lossy();
            let relative_test_path = entry.path().strip_prefix(&root_dir).unwrap().to_string_lossy();
            let test_ident = format_ident!("test_{}", relative_test_path.replace('/', "_").replace(".toy", ""));
            quote! {
                #[test]
                fn #test_ident() {
                    toy_expect(std::fs::read_to_string(#test_file_path).unwrap().as_str());
                }
            }
        })
        .collect();

    quote! {
        #[ctor::ctor]
        fn init() {
            env_logger::init();
        }

        #(#tests)*
    }.into()
}
