use texmax_fmt::{TreeOptions, print_tree, to_latex};
use texmax_syntax::parse;

const SHAPE_ONLY: TreeOptions = TreeOptions { positions: false };

fn assert_round_trip(input: &str) {
    let first = parse(input);
    assert!(first.is_ok(), "{input:?} should parse cleanly: {:?}", first.errors);

    let latex = to_latex(&first.root);
    let second = parse(&latex);
    assert!(second.is_ok(), "re-emitted {latex:?} did not parse: {:?}", second.errors);

    assert_eq!(
        print_tree(&first.root, SHAPE_ONLY),
        print_tree(&second.root, SHAPE_ONLY),
        "tree changed after writing {input:?} as {latex:?}"
    );

    // Writing is stable once normalized.
    assert_eq!(to_latex(&second.root), latex);
}

#[test]
fn test_round_trip_basics() {
    for input in [
        "",
        "x + 1",
        "ab",
        "x^2_1",
        "x^2^3",
        r"\frac{a}{b}",
        r"\frac{a + b}{\frac{1}{2}}",
        r"\sqrt[3]{x}",
        r"\sqrt x",
        r"\binom{n}{k}",
        "{}",
        "{a b} c",
    ] {
        assert_round_trip(input);
    }
}

#[test]
fn test_round_trip_commands() {
    for input in [
        r"\alpha + \Omega",
        r"\sin^2 \theta + \cos^2 \theta = 1",
        r"\sum_{i=1}^{n} i",
        r"\int^b_a f",
        r"\lim_{x} x",
        r"\prod",
        r"a \ b \, c \quad d \qquad e \! f",
        r"\langle x \rangle \lfloor y \rfloor \| z \|",
        r"\backslash \lbrace \rbrace",
    ] {
        assert_round_trip(input);
    }
}

#[test]
fn test_round_trip_braced_bases_and_indices() {
    for input in [
        r"{\sum}^2",
        r"{\int_a}^b",
        r"{\lim_{x}}_0",
        r"{\sum}^2^3",
        r"\sqrt[{]}]{x}",
        r"\sqrt[a {]}]{x}",
        r"\sqrt[{]}^2]{x}",
    ] {
        assert_round_trip(input);
    }
}

#[test]
fn test_round_trip_delimited() {
    for input in [
        r"\left( x \right)",
        r"\left. x \right|",
        r"\left\{ x \right\}",
        r"\left\langle \psi \right\rVert",
        r"\left( \right)",
        r"\left[ \left( a \right) b \right]",
    ] {
        assert_round_trip(input);
    }
}

#[test]
fn test_round_trip_matrix() {
    for input in [
        r"\begin{matrix} a & b \\ c & d \end{matrix}",
        r"\begin{matrix} a & \end{matrix}",
        r"\begin{matrix}\end{matrix}",
        r"\left( \begin{matrix} x^2 & \frac{1}{2} \\ \sqrt{y} & 0 \end{matrix} \right)",
    ] {
        assert_round_trip(input);
    }
}

#[test]
fn test_round_trip_realistic() {
    for input in [
        r"x = \frac{-b + \sqrt{b^2 - 4ac}}{2a}",
        r"e^{i\pi} + 1 = 0",
        r"\sum_{k=1}^{n} k^2 = \frac{n(n+1)(2n+1)}{6}",
        r"\binom{n}{k} a^{n-k} b^k",
    ] {
        assert_round_trip(input);
    }
}
