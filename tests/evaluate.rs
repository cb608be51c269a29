use calc::{evaluate, evaluate_bytes, evaluate_with, render, LiteralWidth, Options, SyntaxError};
use pretty_assertions::assert_eq;
use proptest::{collection::vec, prelude::*};

fn rendered(source: &str) -> String {
    render(&evaluate(source))
}

#[test]
fn documented_outcomes() {
    assert_eq!(rendered(""), "ERROR:1\n");
    assert_eq!(rendered("2 + 3 * 4"), "14\n");
    assert_eq!(rendered("(2 + 3) * 4"), "20\n");
    assert_eq!(rendered("1 - 2 - 3"), "-4\n");
    assert_eq!(rendered("1.2.3"), "ERROR:4\n");
    assert_eq!(rendered("(1 + 2"), "ERROR:7\n");
    assert_eq!(rendered("-5"), "ERROR:1\n");
}

#[test]
fn trailing_whitespace_is_accepted() {
    assert_eq!(rendered("1.5 * 2\n\n"), "3\n");
    assert_eq!(rendered("7 )"), "ERROR:3\n");
}

#[test]
fn bytes_and_text_agree() {
    assert_eq!(evaluate_bytes(b"(1 + 2) * 3"), evaluate("(1 + 2) * 3"));
    assert_eq!(evaluate_bytes(b"1 + \xff").map_err(|e| e.offset()), Err(5));
}

#[test]
fn result_precision_survives_rendering() {
    assert_eq!(rendered("0.1 + 0.2"), "0.3\n");
    assert_eq!(rendered("1234567.891 * 1000"), "1234567891\n");
    assert_eq!(rendered("100000000 * 100000000"), "1e+16\n");
    assert_eq!(rendered(".001 * .001"), "1e-06\n");
}

#[test]
fn literal_width_is_configurable() {
    let source = format!("{}5", "1".repeat(63));
    let wide = Options {
        literal_width: LiteralWidth::Unbounded,
        ..Options::default()
    };

    assert_eq!(rendered(&source), "1.11111111111111e+62\n");
    assert_eq!(
        render(&evaluate_with(source.as_bytes(), wide)),
        "1.11111111111111e+63\n"
    );
}

#[test]
fn every_error_kind_reports_its_offset() {
    let cases: [(&str, usize); 6] = [
        ("2 * .", 5),
        ("2 * x", 5),
        ("2 *", 4),
        ("(2 * 3", 7),
        ("2 3", 3),
        ("((((1))))", 3),
    ];

    let options = Options {
        max_depth: Some(2),
        ..Options::default()
    };
    for (source, offset) in cases {
        let error = evaluate_with(source.as_bytes(), options).unwrap_err();
        assert_eq!(error.offset(), offset, "{source:?}: {error}");
    }
}

#[test]
fn nesting_error_names_the_limit() {
    let options = Options {
        max_depth: Some(1),
        ..Options::default()
    };
    assert_eq!(
        evaluate_with(b"((1))", options),
        Err(SyntaxError::NestingTooDeep {
            limit: 1,
            offset: 2
        })
    );
}

#[derive(Debug, Clone)]
enum Factor {
    Number(u32),
    Group(Box<Expr>),
}

#[derive(Debug, Clone)]
struct Term(Factor, Vec<Factor>);

#[derive(Debug, Clone)]
struct Expr(Term, Vec<(bool, Term)>);

impl Factor {
    fn write(&self, out: &mut String, gap: &str) {
        match self {
            Factor::Number(n) => out.push_str(&n.to_string()),
            Factor::Group(expr) => {
                out.push('(');
                out.push_str(gap);
                expr.write(out, gap);
                out.push_str(gap);
                out.push(')');
            }
        }
    }

    fn value(&self) -> f64 {
        match self {
            Factor::Number(n) => f64::from(*n),
            Factor::Group(expr) => expr.value(),
        }
    }
}

impl Term {
    fn write(&self, out: &mut String, gap: &str) {
        self.0.write(out, gap);
        for factor in &self.1 {
            out.push_str(gap);
            out.push('*');
            out.push_str(gap);
            factor.write(out, gap);
        }
    }

    fn value(&self) -> f64 {
        self.1.iter().fold(self.0.value(), |acc, f| acc * f.value())
    }
}

impl Expr {
    fn write(&self, out: &mut String, gap: &str) {
        self.0.write(out, gap);
        for (add, term) in &self.1 {
            out.push_str(gap);
            out.push(if *add { '+' } else { '-' });
            out.push_str(gap);
            term.write(out, gap);
        }
    }

    fn value(&self) -> f64 {
        self.1.iter().fold(self.0.value(), |acc, (add, term)| {
            if *add {
                acc + term.value()
            } else {
                acc - term.value()
            }
        })
    }

    fn source(&self, gap: &str) -> String {
        let mut out = String::new();
        self.write(&mut out, gap);
        out
    }
}

fn term_of(factor: impl Strategy<Value = Factor> + Clone) -> impl Strategy<Value = Term> + Clone {
    (factor.clone(), vec(factor, 0..3)).prop_map(|(first, rest)| Term(first, rest))
}

fn expr_of(factor: impl Strategy<Value = Factor> + Clone) -> impl Strategy<Value = Expr> {
    let term = term_of(factor);
    (term.clone(), vec((any::<bool>(), term), 0..3)).prop_map(|(first, rest)| Expr(first, rest))
}

fn factor() -> BoxedStrategy<Factor> {
    (0u32..1000)
        .prop_map(Factor::Number)
        .prop_recursive(3, 24, 3, |inner| {
            expr_of(inner).prop_map(|expr| Factor::Group(Box::new(expr)))
        })
        .boxed()
}

proptest! {
    #[test]
    fn valid_expressions_evaluate_like_the_grammar(expr in expr_of(factor())) {
        let expected = expr.value();
        prop_assert_eq!(evaluate(&expr.source(" ")), Ok(expected));
        prop_assert_eq!(evaluate(&expr.source("")), Ok(expected));
        prop_assert_eq!(evaluate(&expr.source("\n\t")), Ok(expected));
    }

    #[test]
    fn evaluation_is_repeatable(source in "[0-9 .()+*x-]{0,32}") {
        let first = evaluate(&source);
        let second = evaluate(&source);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn error_offsets_stay_in_bounds(source in "[0-9 .()+*-]{0,32}") {
        if let Err(error) = evaluate(&source) {
            prop_assert!(error.offset() >= 1);
            prop_assert!(error.offset() <= source.len() + 1);
        }
    }
}
