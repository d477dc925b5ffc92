use blast::{
    ast::{
        BinaryOperator, ChainAccess, Expr, Literal, Pattern, PatternElement, Program, Stmt,
        UnaryOperator,
    },
    error::ParseErrors,
    interpreter::{
        lexer::{Lexer, TokenKind},
        parser::{Parser, parse_source},
    },
};
use pretty_assertions::assert_eq;

fn parse(source: &str) -> Program {
    parse_source(source).unwrap_or_else(|e| panic!("failed to parse {source:?}:\n{e}"))
}

fn parse_errors(source: &str) -> ParseErrors {
    match parse_source(source) {
        Ok(program) => panic!("{source:?} parsed, expected errors: {program:?}"),
        Err(errors) => errors,
    }
}

/// Parses a single expression statement.
fn expr(source: &str) -> Expr {
    let mut program = parse(&format!("{source};"));
    assert_eq!(program.declarations.len(), 1);

    match program.declarations.remove(0) {
        Stmt::Expression { expr, .. } => expr,
        other => panic!("expected an expression statement, got {other:?}"),
    }
}

fn op(op: BinaryOperator) -> &'static str {
    match op {
        BinaryOperator::Add => "+",
        BinaryOperator::Sub => "-",
        BinaryOperator::Mul => "*",
        BinaryOperator::Div => "/",
        BinaryOperator::Mod => "%",
        BinaryOperator::Equal => "==",
        BinaryOperator::NotEqual => "!=",
        BinaryOperator::Less => "<",
        BinaryOperator::LessEqual => "<=",
        BinaryOperator::Greater => ">",
        BinaryOperator::GreaterEqual => ">=",
        BinaryOperator::And => "&&",
        BinaryOperator::Or => "||",
        BinaryOperator::Range => "..",
    }
}

/// Renders an expression as an S-expression, ignoring spans.
fn sexpr(expr: &Expr) -> String {
    match expr {
        Expr::Literal { value, .. } => match value {
            Literal::Integer(i) => i.to_string(),
            Literal::Float(f) => f.to_string(),
            Literal::String(s) => format!("{s:?}"),
            Literal::Bool(b) => b.to_string(),
            Literal::Null => "null".to_string(),
        },
        Expr::Identifier { name, .. } => name.clone(),
        Expr::Binary { left,
                       op: operator,
                       right,
                       .. } => format!("({} {} {})", op(*operator), sexpr(left), sexpr(right)),
        Expr::Unary { op: UnaryOperator::Negate,
                      operand,
                      .. } => format!("(neg {})", sexpr(operand)),
        Expr::Unary { op: UnaryOperator::Not,
                      operand,
                      .. } => format!("(! {})", sexpr(operand)),
        Expr::TypeOf { operand, .. } => format!("(typeof {})", sexpr(operand)),
        Expr::Call { callee, arguments, .. } => {
            let mut out = format!("(call {}", sexpr(callee));
            for argument in arguments {
                out.push(' ');
                out.push_str(&sexpr(argument));
            }
            out.push(')');
            out
        },
        Expr::Assign { target, value, .. } => format!("(= {} {})", sexpr(target), sexpr(value)),
        Expr::Index { object, index, .. } => format!("(index {} {})", sexpr(object), sexpr(index)),
        Expr::Member { object, name, .. } => format!("(. {} {name})", sexpr(object)),
        Expr::StructLiteral { name, fields, .. } => {
            let mut out = format!("(struct {name}");
            for (field, value) in fields {
                out.push_str(&format!(" {field}:{}", sexpr(value)));
            }
            out.push(')');
            out
        },
        Expr::ArrayLiteral { elements, .. } => {
            let items = elements.iter().map(sexpr).collect::<Vec<_>>();
            format!("[{}]", items.join(" "))
        },
        Expr::Spread { operand, .. } => format!("(... {})", sexpr(operand)),
        Expr::OptionalChain { object,
                              access: ChainAccess::Member(name),
                              .. } => format!("(?. {} {name})", sexpr(object)),
        Expr::OptionalChain { object,
                              access: ChainAccess::Index(index),
                              .. } => format!("(?.[] {} {})", sexpr(object), sexpr(index)),
        Expr::NullishCoalescing { left, right, .. } => {
            format!("(?? {} {})", sexpr(left), sexpr(right))
        },
        Expr::Function { decl, .. } => format!("(blast/{})", decl.params.len()),
    }
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(sexpr(&expr("1 + 2 * 3")), "(+ 1 (* 2 3))");
    assert_eq!(sexpr(&expr("(1 + 2) * 3")), "(* (+ 1 2) 3)");
    assert_eq!(sexpr(&expr("1 - 2 - 3")), "(- (- 1 2) 3)");
}

#[test]
fn assignment_is_right_associative() {
    assert_eq!(sexpr(&expr("a = b = 3")), "(= a (= b 3))");
    assert_eq!(sexpr(&expr("xs[0] = p.x = 1")), "(= (index xs 0) (= (. p x) 1))");
}

#[test]
fn precedence_ladder() {
    assert_eq!(sexpr(&expr("a || b && c == d")), "(|| a (&& b (== c d)))");
    assert_eq!(sexpr(&expr("a ?? b || c")), "(?? a (|| b c))");
    assert_eq!(sexpr(&expr("x < y + 1")), "(< x (+ y 1))");
    assert_eq!(sexpr(&expr("-a * !b")), "(* (neg a) (! b))");
    assert_eq!(sexpr(&expr("0 .. n - 1")), "(.. 0 (- n 1))");
    assert_eq!(sexpr(&expr("typeof x == \"int\"")), "(== (typeof x) \"int\")");
}

#[test]
fn postfix_chains() {
    assert_eq!(sexpr(&expr("array.map(xs, f)[0]")),
               "(index (call (. array map) xs f) 0)");
    assert_eq!(sexpr(&expr("Color::Red")), "(. Color Red)");
    assert_eq!(sexpr(&expr("user?.name")), "(?. user name)");
    assert_eq!(sexpr(&expr("row?.[2]")), "(?.[] row 2)");
    assert_eq!(sexpr(&expr("f(...args, 1)")), "(call f (... args) 1)");
}

#[test]
fn literals_and_escapes() {
    assert_eq!(sexpr(&expr(r#""tab\there""#)), "\"tab\\there\"");
    assert_eq!(sexpr(&expr("'x'")), "\"x\"");
    assert_eq!(sexpr(&expr("[1, 2.5, true, null]")), "[1 2.5 true null]");
    assert_eq!(sexpr(&expr("await f()")), "(call f)");
}

#[test]
fn struct_literal_needs_field_syntax() {
    assert_eq!(sexpr(&expr("Point { x: 1, y: 2 }")), "(struct Point x:1 y:2)");
    assert_eq!(sexpr(&expr("Empty {}")), "(struct Empty)");

    // A block after a condition is never a struct literal.
    let program = parse("if (ready) { echo 1; }");
    assert!(matches!(&program.declarations[0],
                     Stmt::If { then_branch, .. } if matches!(**then_branch, Stmt::Block { .. })));
}

#[test]
fn anonymous_function_expression() {
    assert_eq!(sexpr(&expr("array.map(xs, blast(x) { return x * 2; })")),
               "(call (. array map) xs (blast/1))");
}

#[test]
fn declarations() {
    let program = parse(
                        r#"
        import std.io;
        struct Point { int x, int y }
        enum Color { Red, Green = 5, Blue }
        async blast fetch(string url) -> string { return url; }
        int[] xs = [1, 2];
        turbo [first, _, ...rest] = xs;
        turbo {x, y} = p;
    "#,
    );

    let [Stmt::Import { path, .. },
         Stmt::Struct(point),
         Stmt::Enum(color),
         Stmt::Function(fetch),
         Stmt::VarDecl { type_info, .. },
         Stmt::VarDecl { target: array_target,
                         .. },
         Stmt::VarDecl { target: struct_target,
                         .. }] = program.declarations.as_slice()
    else {
        panic!("unexpected declarations: {:#?}", program.declarations);
    };

    assert_eq!(path, "std.io");
    assert_eq!(point.fields
                    .iter()
                    .map(|f| f.name.as_str())
                    .collect::<Vec<_>>(),
               ["x", "y"]);
    assert_eq!(color.variants,
               [("Red".to_string(), None),
                ("Green".to_string(), Some(5)),
                ("Blue".to_string(), None)]);
    assert!(fetch.is_async);
    assert_eq!(fetch.name.as_deref(), Some("fetch"));
    assert_eq!(fetch.return_type.as_ref().map(|t| t.name.as_str()),
               Some("string"));
    assert_eq!((type_info.name.as_str(), type_info.is_array), ("int", true));
    assert_eq!(*array_target,
               Pattern::Array(vec![PatternElement::Bind("first".to_string()),
                                   PatternElement::Skip,
                                   PatternElement::Rest("rest".to_string())]));
    assert_eq!(*struct_target,
               Pattern::Struct(vec!["x".to_string(), "y".to_string()]));
}

#[test]
fn elif_nests_into_else_branch() {
    let program = parse("if (a) echo 1; elif (b) echo 2; else echo 3;");

    let Stmt::If { else_branch: Some(inner),
                   .. } = &program.declarations[0]
    else {
        panic!("expected if");
    };
    let Stmt::If { else_branch: Some(last),
                   .. } = inner.as_ref()
    else {
        panic!("expected nested if");
    };

    assert!(matches!(last.as_ref(), Stmt::Echo { .. }));
}

#[test]
fn c_style_cruise_desugars_to_loop() {
    let program = parse("cruise (turbo i = 0; i < 3; i = i + 1) { echo i; }");

    let [Stmt::Block { statements, .. }] = program.declarations.as_slice() else {
        panic!("expected a block");
    };
    let [Stmt::VarDecl { .. }, Stmt::Loop { condition: Some(condition),
                                            body,
                                            .. }] = statements.as_slice()
    else {
        panic!("expected initializer and loop: {statements:#?}");
    };
    assert_eq!(sexpr(condition), "(< i 3)");

    let Stmt::Block { statements: looped,
                      .. } = body.as_ref()
    else {
        panic!("expected loop body block");
    };
    assert_eq!(looped.len(), 2);
    assert!(matches!(&looped[1], Stmt::Expression { expr, .. } if sexpr(expr) == "(= i (+ i 1))"));
}

#[test]
fn range_cruise_keeps_its_variable() {
    let program = parse("cruise (i in 0..3) echo i;");

    let [Stmt::Cruise { variable, iterable, .. }] = program.declarations.as_slice() else {
        panic!("expected cruise");
    };
    assert_eq!(variable, "i");
    assert_eq!(sexpr(iterable), "(.. 0 3)");
}

#[test]
fn echo_takes_a_comma_list() {
    let program = parse("echo 1, \"two\", x;");

    let [Stmt::Echo { values, .. }] = program.declarations.as_slice() else {
        panic!("expected echo");
    };
    assert_eq!(values.len(), 3);
}

#[test]
fn two_independent_errors_give_two_diagnostics() {
    let errors = parse_errors("turbo a = ;\necho(1);\nturbo b = 2\necho(b);\n");

    assert_eq!(errors.len(), 2);
    let messages = errors.iter()
                         .map(|e| (e.message.as_str(), e.line))
                         .collect::<Vec<_>>();
    assert_eq!(messages,
               [("Expect expression.", 1), ("Expect ';' after variable declaration.", 4)]);
}

#[test]
fn lexer_error_does_not_hide_a_later_syntax_error() {
    let errors = parse_errors("turbo a = 1 @;\nturbo b = 2;\nturbo = ;\n");

    let messages = errors.iter()
                         .map(|e| (e.message.as_str(), e.line))
                         .collect::<Vec<_>>();
    assert_eq!(messages,
               [("Unexpected character.", 1), ("Expect variable name.", 3)]);
}

#[test]
fn unclosed_block_is_reported_after_an_unrelated_error() {
    let errors = parse_errors("turbo = ;\necho 1;\nblast f() { echo 2;\n");

    let messages = errors.iter()
                         .map(|e| e.message.as_str())
                         .collect::<Vec<_>>();
    assert_eq!(messages, ["Expect variable name.", "Expect '}' after block."]);
}

#[test]
fn loop_condition_needs_parentheses() {
    let errors = parse_errors("turbo running = true;\nloop running { break; }");

    assert_eq!(errors.iter().next().map(|e| (e.message.as_str(), e.line)),
               Some(("Expect '(' before loop condition.", 2)));
    assert!(parse_source("loop (running) { break; }").is_ok());
}

#[test]
fn end_of_input_mid_statement_is_one_diagnostic() {
    for source in ["turbo x = 1 +", "echo(", "blast f() { echo 1;", "if (x"] {
        let errors = parse_errors(source);
        assert_eq!(errors.len(), 1, "{source:?}: {errors}");
        assert_eq!(errors.iter().next().map(|e| e.token), Some(TokenKind::Eof));
    }
}

#[test]
fn invalid_assignment_target() {
    let errors = parse_errors("1 = 2;");

    assert_eq!(errors.iter().next().map(|e| e.message.as_str()),
               Some("Invalid assignment target."));
}

#[test]
fn lexer_errors_become_diagnostics() {
    let errors = parse_errors("turbo s = \"open;");
    assert_eq!(errors.iter().next().map(|e| e.message.as_str()),
               Some("Unterminated string."));

    let errors = parse_errors("turbo n = 99999999999999999999;");
    assert_eq!(errors.iter().next().map(|e| e.message.as_str()),
               Some("Integer literal out of range."));
}

#[test]
fn diagnostic_block_layout_and_suggestion() {
    let errors = parse_errors("function add(a, b) { return a + b; }");
    let first = errors.iter().next().unwrap();

    assert_eq!(first.suggestion, Some("blast"));
    let expected = ["error: Expect ';' after variable declaration.",
                    " --> Line 1, Column 13",
                    "  |",
                    "1 | function add(a, b) { return a + b; }",
                    "  |             ^",
                    "  = token: LEFT_PAREN",
                    "  = help: did you mean `blast`?"].join("\n");
    assert_eq!(first.to_string(), expected);
}

#[test]
fn one_statement_at_a_time() {
    let mut parser = Parser::new(Lexer::new("turbo a = 1; echo a; turbo = 2; echo a;"));

    assert!(matches!(parser.parse_one_statement(), Ok(Some(Stmt::VarDecl { .. }))));
    assert!(matches!(parser.parse_one_statement(), Ok(Some(Stmt::Echo { .. }))));
    assert!(parser.parse_one_statement().is_err());
    assert!(matches!(parser.parse_one_statement(), Ok(Some(Stmt::Echo { .. }))));
    assert!(matches!(parser.parse_one_statement(), Ok(None)));
}
