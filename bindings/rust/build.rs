use std::env;
use std::path::Path;

fn main() {
    let src_dir = Path::new("src");
    let parser_path = src_dir.join("parser.c");
    let header_path = src_dir.join("tree_sitter").join("parser.h");

    let mut build = cc::Build::new();
    build.std("c11").include(src_dir).file(&parser_path);
    build
        .flag_if_supported("-Wno-unused-parameter")
        .flag_if_supported("-Wno-unused-but-set-variable")
        .flag_if_supported("-Wno-trigraphs");
    #[cfg(target_env = "msvc")]
    build.flag("-utf-8");

    let profile = env::var("PROFILE").expect("PROFILE not set");
    if profile == "debug" {
        build.debug(true);
        build.opt_level(0);
    } else {
        build.debug(false);
        build.opt_level(3);
    }

    build.compile("tree-sitter-wabznasm");

    println!("cargo:rerun-if-changed={}", parser_path.display());
    println!("cargo:rerun-if-changed={}", header_path.display());
}
