// src/explorer/language.rs
// =============================================================================
// Guesses the syntax-highlighting mode for a file from its extension.
//
// The extension is fuzzy-matched against the code editor's mode names, so
// "yml" lands on "yaml" and "py" on "python" without a lookup table.
// Anything too far from every mode is shown as plain text.
// =============================================================================

use similar::TextDiff;

/// Mode used when nothing matches closely enough.
pub const PLAIN_TEXT: &str = "text";

/// Minimum similarity (0.0 - 1.0) for a mode to be picked.
pub const MATCH_CUTOFF: f32 = 0.5;

/// Modes the browser code viewer knows how to highlight.
pub const LANGUAGES: &[&str] = &[
    "abap", "abc", "actionscript", "ada", "alda", "apache_conf", "apex", "applescript", "aql",
    "asciidoc", "asl", "assembly_x86", "autohotkey", "batchfile", "bibtex", "c9search", "c_cpp",
    "cirru", "clojure", "cobol", "coffee", "coldfusion", "crystal", "csharp", "csound_document",
    "csound_orchestra", "csound_score", "csp", "css", "curly", "d", "dart", "diff", "django",
    "dockerfile", "dot", "drools", "edifact", "eiffel", "ejs", "elixir", "elm", "erlang", "forth",
    "fortran", "fsharp", "fsl", "ftl", "gcode", "gherkin", "gitignore", "glsl", "gobstones",
    "golang", "graphqlschema", "groovy", "haml", "handlebars", "haskell", "haskell_cabal", "haxe",
    "hjson", "html", "html_elixir", "html_ruby", "ini", "io", "ion", "jack", "jade", "java",
    "javascript", "jexl", "json", "json5", "jsoniq", "jsp", "jssm", "jsx", "julia", "kotlin",
    "latex", "latte", "less", "liquid", "lisp", "livescript", "logiql", "logtalk", "lsl", "lua",
    "luapage", "lucene", "makefile", "markdown", "mask", "matlab", "maze", "mediawiki", "mel",
    "mips", "mixal", "mushcode", "mysql", "nginx", "nim", "nix", "nsis", "nunjucks", "objectivec",
    "ocaml", "partiql", "pascal", "perl", "pgsql", "php", "php_laravel_blade", "pig",
    "plain_text", "powershell", "praat", "prisma", "prolog", "properties", "protobuf", "puppet",
    "python", "qml", "r", "raku", "razor", "rdoc", "red", "redshift", "rhtml", "robot", "rst",
    "ruby", "rust", "sac", "sass", "scad", "scala", "scheme", "scrypt", "scss", "sh", "sjs",
    "slim", "smarty", "smithy", "snippets", "soy_template", "space", "sparql", "sql",
    "sqlserver", "stylus", "svg", "swift", "tcl", "terraform", "tex", "text", "textile", "toml",
    "tsx", "turtle", "twig", "typescript", "vala", "vbscript", "velocity", "verilog", "vhdl",
    "visualforce", "wollok", "xml", "xquery", "yaml", "zeek",
];

/// Everything after the last '.', or the whole name when there is none.
pub fn extension_of(filename: &str) -> &str {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ext,
        None => filename,
    }
}

/// Picks the closest highlighting mode for `filename`.
///
/// Candidates are ranked by (ratio, name): on equal ratios the name that
/// sorts last wins, so "rb" lands on "ruby" rather than "r".
pub fn resolve_language(filename: &str) -> &'static str {
    let extension = extension_of(filename);

    LANGUAGES
        .iter()
        .map(|lang| (TextDiff::from_chars(extension, *lang).ratio(), *lang))
        .filter(|(ratio, _)| *ratio >= MATCH_CUTOFF)
        .max_by(|(ra, a), (rb, b)| ra.total_cmp(rb).then_with(|| a.cmp(b)))
        .map(|(_, lang)| lang)
        .unwrap_or(PLAIN_TEXT)
}
