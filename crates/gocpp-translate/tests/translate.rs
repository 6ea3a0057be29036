use gocpp_translate::{TranslateErrorKind, translate};

fn lines(cpp: &str) -> Vec<&str> {
    cpp.lines().map(str::trim).collect()
}

fn error_kind(source: &str) -> TranslateErrorKind {
    translate(source).unwrap_err().kind
}

#[test]
fn test_iota_block_counts_from_zero() {
    let cpp = translate(
        "const (\nRed = iota\nGreen\nBlue\n)\nfunc main() {\nfmt.Println(\"n\", 1)\n}\n",
    )
    .unwrap();
    insta::assert_snapshot!(cpp, @r#"
    #include <iostream>

    const auto Red = 0;
    const auto Green = 1;
    const auto Blue = 2;
    auto main() -> int {
    std::cout << "n" << " " << 1 << std::endl;
    return 0;
    }
    "#);
}

#[test]
fn test_two_results_become_a_tuple() {
    let cpp = translate(
        "func divmod(a, b int) (int, int) {\n\treturn a / b, a % b\n}\n\
         func main() {\n\tq, r := divmod(7, 2)\n\tfmt.Println(q, r)\n}\n",
    )
    .unwrap();
    let out = lines(&cpp);
    assert!(out.contains(&"#include <tuple>"));
    assert!(out.contains(&"auto divmod(int a, int b) -> std::tuple<int, int> {"));
    assert!(out.contains(&"return std::tuple<int, int>{a / b, a % b};"));
    assert!(out.contains(&"auto [q, r] = divmod(7, 2);"));
}

#[test]
fn test_map_range_destructures_pairs() {
    let cpp = translate(
        "func main() {\n\
         \tages := map[string]int{\"al\": 3, \"bo\": 5}\n\
         \tfor k, v := range ages {\n\
         \t\tfmt.Println(k, v)\n\
         \t}\n\
         }\n",
    )
    .unwrap();
    let out = lines(&cpp);
    assert!(out.contains(
        &r#"std::unordered_map<std::string, int> ages{{"al", 3}, {"bo", 5}};"#
    ));
    assert!(out.contains(&"for (const auto& [k, v] : ages) {"));
    assert!(out.contains(&"#include <unordered_map>"));
}

#[test]
fn test_multi_line_map_literal() {
    let cpp = translate(
        "func main() {\n\
         m := map[string]int{\n\
         \"one\": 1,\n\
         \"two\": 2,\n\
         }\n\
         for k := range m {\n\
         fmt.Println(k)\n\
         }\n\
         }\n",
    )
    .unwrap();
    let out = lines(&cpp);
    let open = out
        .iter()
        .position(|l| *l == "std::unordered_map<std::string, int> m{")
        .unwrap();
    assert_eq!(out[open + 1..open + 4], [r#"{"one", 1},"#, r#"{"two", 2},"#, "};"]);
    assert!(out.contains(&"for (const auto& [k, _v] : m) {"));
}

#[test]
fn test_map_literal_closed_by_last_entry() {
    let cpp = translate(
        "func main() {\n\
         m := map[string]int{\n\
         \"a\": 1,\n\
         \"b\": 2}\n\
         for k, v := range m {\n\
         fmt.Println(k, v)\n\
         }\n\
         }\n",
    )
    .unwrap();
    let out = lines(&cpp);
    assert!(out.contains(&r#"{"b", 2}};"#));
    assert!(out.contains(&"for (const auto& [k, v] : m) {"));
    assert!(!out.iter().any(|l| l.contains("{k, v}")));
}

#[test]
fn test_loops_never_mention_range() {
    let cpp = translate(
        "func main() {\n\
         xs := []int{1, 2, 3}\n\
         m := make(map[string]bool)\n\
         for i := range xs {\n}\n\
         for _, x := range xs {\n}\n\
         for i, x := range xs {\n}\n\
         for range xs {\n}\n\
         for k, v := range m {\n}\n\
         for _, v := range m {\n}\n\
         for i := range 10 {\n}\n\
         }\n",
    )
    .unwrap();
    assert!(!cpp.contains("range"));
    assert!(cpp.contains("auto x = xs[i];"));
}

#[test]
fn test_fallthrough_label_opens_next_case() {
    let cpp = translate(
        "func classify(n int) {\n\
         switch n {\n\
         case 0:\n\
         fmt.Println(\"zero\")\n\
         fallthrough\n\
         case 1:\n\
         fmt.Println(\"small\")\n\
         default:\n\
         fmt.Println(\"big\")\n\
         }\n\
         }\n",
    )
    .unwrap();
    let out = lines(&cpp);
    let goto = out.iter().position(|l| *l == "goto _l__0;").unwrap();
    let case = out
        .iter()
        .position(|l| *l == "} else if (_s__0 == 1) {")
        .unwrap();
    assert!(goto < case);
    assert_eq!(out[case + 1], "_l__0:");
    assert_eq!(out.iter().filter(|l| **l == "_l__0:").count(), 1);
    assert!(out.contains(&"} else {"));
}

#[test]
fn test_literal_only_print_skips_formatter() {
    let cpp = translate("func main() {\nfmt.Println(\"a\", 1, \"b\")\n}\n").unwrap();
    assert!(!cpp.contains("_format_output"));
    assert!(cpp.contains(r#"std::cout << "a" << " " << 1 << " " << "b" << std::endl;"#));
}

#[test]
fn test_single_value_print_uses_formatter_once() {
    let cpp = translate("func main() {\nx := 3\nfmt.Println(x)\n}\n").unwrap();
    let out = lines(&cpp);
    let call = out
        .iter()
        .position(|l| *l == "_format_output(std::cout, x);")
        .unwrap();
    assert_eq!(out[call + 1], "std::cout << std::endl;");
    assert_eq!(
        out.iter()
            .filter(|l| l.starts_with("_format_output(std::cout"))
            .count(),
        1
    );
    assert!(cpp.contains("void _format_output(std::ostream& out, T const& x)"));
    assert!(!cpp.contains("_has_String"));
}

#[test]
fn test_struct_gets_string_method() {
    let cpp = translate(
        "type Point struct {\n\
         X, Y int\n\
         Label string `json:\"label\"`\n\
         }\n\
         func main() {\n\
         p := Point{1, 2, \"origin\"}\n\
         fmt.Println(p)\n\
         }\n",
    )
    .unwrap();
    let out = lines(&cpp);
    let class = out.iter().position(|l| *l == "class Point {").unwrap();
    assert_eq!(
        out[class..class + 5],
        ["class Point {", "public:", "int X{};", "int Y{};", "std::string Label{};"]
    );
    assert!(out.contains(&"_format_output(_ss, Label);"));
    assert!(out.contains(&"auto p = Point{1, 2, \"origin\"};"));
    assert!(cpp.contains("struct _has_String"));
    assert!(cpp.contains("#include <sstream>"));
}

#[test]
fn test_string_helpers_are_injected() {
    let cpp = translate(
        "func main() {\ns := \" go \"\nif strings.Contains(s, \"o\") {\nprintln(strings.TrimSpace(s))\n}\n}\n",
    )
    .unwrap();
    assert!(cpp.contains("if (stringsContains(s, \"o\")) {"));
    assert!(cpp.contains("inline bool stringsContains("));
    assert!(cpp.contains("inline std::string stringsTrimSpace("));
    assert!(!cpp.contains("strings."));
}

#[test]
fn test_translation_is_deterministic() {
    let source = "func main() {\nswitch 1 {\ncase 1:\n}\nswitch 2 {\ncase 2:\n}\n}\n";
    let first = translate(source).unwrap();
    assert_eq!(first, translate(source).unwrap());
    assert!(first.contains("auto _s__1 = 2;"));
}

#[test]
fn test_errors_carry_kind_and_line() {
    let err = translate("func main() {\ns := `first\nsecond`\n}\n").unwrap_err();
    assert_eq!(err.kind, TranslateErrorKind::UnsupportedLiteralForm);
    assert_eq!(err.line, 2);

    let err = translate("const (\nA = 1\nB C D\n)\n").unwrap_err();
    assert_eq!(err.kind, TranslateErrorKind::UnrecognizedDeclaration);
    assert_eq!(err.line, 3);
    assert_eq!(err.source_line, "B C D");
}

#[test]
fn test_rejected_constructs() {
    assert_eq!(
        error_kind("func main() {\nfmt.Printf(\"%v\\n\", 1)\n}\n"),
        TranslateErrorKind::UnsupportedFormatVerb
    );
    assert_eq!(
        error_kind("func main() {\nfor i = range xs {\n}\n}\n"),
        TranslateErrorKind::UnimplementedLoopForm
    );
    assert_eq!(
        error_kind("func (p Point) Len() int {\nreturn 0\n}\n"),
        TranslateErrorKind::UnsupportedConstruct
    );
    assert_eq!(
        error_kind("func main() {\ngo work()\n}\n"),
        TranslateErrorKind::UnsupportedConstruct
    );
    assert_eq!(
        error_kind("func main() {\nf(\n1)\n}\n"),
        TranslateErrorKind::UnsupportedConstruct
    );
    assert_eq!(error_kind("}\n"), TranslateErrorKind::UnbalancedBraces);
}

#[test]
fn test_literal_spanning_lines_is_rejected() {
    let err = translate("func main() {\nxs := []int{\n1,\n}\n}\n").unwrap_err();
    assert_eq!(err.kind, TranslateErrorKind::UnsupportedConstruct);
    assert_eq!(err.line, 2);
    let err =
        translate("type P struct {\nX int\n}\nfunc main() {\np := P{\nX: 1,\n}\n}\n").unwrap_err();
    assert_eq!(err.kind, TranslateErrorKind::UnsupportedConstruct);
    assert_eq!(err.line, 5);
}

#[test]
fn test_keyed_struct_literal() {
    let cpp = translate(
        "type P struct {\nX, Y int\n}\nfunc main() {\np := P{X: 1, Y: 2}\nq := &P{Y: 3}\nfmt.Println(p, q)\n}\n",
    )
    .unwrap();
    let out = lines(&cpp);
    assert!(out.contains(&"auto p = P{.X = 1, .Y = 2};"));
    assert!(out.contains(&"auto q = new P{.Y = 3};"));
}

#[test]
fn test_comma_ok_in_if_initializer() {
    let cpp = translate(
        "func main() {\n\
         m := map[string]int{\"a\": 1}\n\
         if v, ok := m[\"a\"]; ok {\n\
         fmt.Println(v)\n\
         }\n\
         }\n",
    )
    .unwrap();
    let out = lines(&cpp);
    assert!(out.contains(
        &r#"if (auto [v, ok] = std::pair{m.count("a") != 0 ? m.at("a") : decltype(m)::mapped_type{}, m.count("a") != 0}; ok) {"#
    ));
    assert!(out.contains(&"#include <utility>"));
}

#[test]
fn test_string_literal_concatenation() {
    let cpp = translate("func main() {\ns := \"a\" + \"b\"\nfmt.Println(s)\n}\n").unwrap();
    let out = lines(&cpp);
    assert!(out.contains(&"using namespace std::string_literals;"));
    assert!(out.contains(&r#"auto s = "a"s + "b";"#));
    assert!(out.contains(&"#include <string>"));
}

#[test]
fn test_bare_return_with_named_results_is_rejected() {
    let err = translate("func split(n int) (q, r int) {\nq = n / 2\nr = n % 2\nreturn\n}\n")
        .unwrap_err();
    assert_eq!(err.kind, TranslateErrorKind::UnsupportedConstruct);
    assert_eq!(err.line, 4);
}
