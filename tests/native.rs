use blast::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            function::core::{CORE_NATIVES, NativeRegistry, arg},
            output::OutputBuffer,
        },
        lexer::Lexer,
        parser::Parser,
        value::core::Value,
    },
    run_source_with,
};
use pretty_assertions::assert_eq;

fn run_with(interpreter: Interpreter, source: &str) -> String {
    let buffer = OutputBuffer::new();
    let mut interpreter = interpreter.with_output(buffer.clone());

    let status = run_source_with(source, &mut interpreter).unwrap_or_else(|e| panic!("Script failed: {e}"));
    assert_eq!(status, 0);

    buffer.contents()
}

fn output(source: &str) -> String {
    run_with(Interpreter::new(), source)
}

#[test]
fn registry_starts_with_the_core_natives() {
    let registry = NativeRegistry::with_core();

    assert_eq!(registry.len(), CORE_NATIVES.len());
    assert!(registry.contains("array.map"));
    assert!(registry.contains("math.sqrt"));
    assert!(registry.contains("len"));
    assert!(!registry.contains("array"));
    assert!(NativeRegistry::new().is_empty());
}

#[test]
fn array_mutators() {
    let source = r#"
        turbo xs = ["b", 3, "a", 1.5];
        array.sort(xs);
        echo xs;
        echo array.pop(xs), array.length(xs), array.pop([]);
        array.reverse(xs);
        echo xs;
    "#;

    assert_eq!(output(source), "[1.5,3,\"a\",\"b\"]\nb 3 null\n[\"a\",3,1.5]\n");
}

#[test]
fn higher_order_array_natives() {
    let source = r#"
        turbo xs = [1, 2, 3, 4];
        blast even(x) { return x % 2 == 0; }
        echo array.map(xs, blast(x) { return x * x; });
        echo array.filter(xs, even);
        echo array.reduce(xs, blast(a, b) { return a + b; });
        echo array.reduce(xs, blast(a, b) { return a + b; }, 10);
        echo array.reduce([], blast(a, b) { return a + b; });
        echo array.find(xs, even), array.find(xs, blast(x) { return x > 9; });
        echo array.some(xs, even), array.every(xs, even), array.every([], even);
    "#;

    assert_eq!(output(source),
               "[1,4,9,16]\n[2,4]\n10\n20\nnull\n2 null\ntrue false true\n");
}

#[test]
fn callbacks_do_not_clobber_the_caller() {
    let source = r#"
        blast run(n) {
            turbo mapped = array.map([10, 20], blast(n) { return n + 1; });
            return [n, mapped];
        }
        echo run(5);
    "#;

    assert_eq!(output(source), "[5,[11,21]]\n");
}

#[test]
fn throws_escape_callbacks() {
    let source = r#"
        try {
            array.map([1], blast(x) { throw "from callback"; });
        } catch (e) {
            echo e;
        }
    "#;

    assert_eq!(output(source), "from callback\n");
}

#[test]
fn math_natives() {
    let source = r#"
        echo math.sqrt(16), math.abs(-3), math.abs(-2.5), math.floor(2.7), math.ceil(2.1);
        echo math.pow(2, 10), math.pow(2, -1), math.min(3, 1.5, 2), math.max(1, 7), math.max();
        echo math.sqrt("x"), math.min(1, "2");
    "#;

    assert_eq!(output(source),
               "4 3 2.5 2 3\n1024 0.5 1.5 7 null\nnull null\n");
}

#[test]
fn string_natives() {
    let source = r#"
        echo string.length("héllo"), string.upper("a"), string.lower("B"), string.contains("abc", "b");
        echo string.split("a,b", ","), string.split("ab", "");
        echo str(12) + "!", str([1]), len([1, 2]), len("abc"), len(3);
    "#;

    assert_eq!(output(source),
               "5 A b true\n[\"a\",\"b\"] [\"a\",\"b\"]\n12! [1] 2 3 null\n");
}

#[test]
fn method_call_sugar() {
    let source = r#"
        turbo xs = [3, 1, 2];
        xs.push(0);
        xs.sort();
        echo xs, xs.length();
        echo "shout".upper(), "a-b".split("-");
        echo xs.missing(), (5).upper();
    "#;

    assert_eq!(output(source), "[0,1,2,3] 4\nSHOUT [\"a\",\"b\"]\nnull null\n");
}

#[test]
fn struct_fields_holding_functions_are_callable() {
    let source = r#"
        struct Greeter { greet }
        turbo g = Greeter { greet: blast(name) { return "hi " + name; } };
        echo g.greet("bob");
    "#;

    assert_eq!(output(source), "hi bob\n");
}

fn answer(_: &mut Interpreter, _: &[Value]) -> EvalResult<Value> {
    Ok(Value::int(42))
}

fn count_to(_: &mut Interpreter, args: &[Value]) -> EvalResult<Value> {
    let n = arg(args, 0).as_int().unwrap_or(0);
    let result = Value::array_with_capacity(usize::try_from(n).unwrap_or(0));

    for i in 0..n {
        result.array_push(Value::int(i));
    }

    Ok(result)
}

fn twice(interpreter: &mut Interpreter, args: &[Value]) -> EvalResult<Value> {
    let function = arg(args, 0);
    let once = interpreter.execute_callback(&function, &[arg(args, 1)])?;
    interpreter.execute_callback(&function, &[once])
}

fn shout(_: &mut Interpreter, args: &[Value]) -> EvalResult<Value> {
    let handle = arg(args, 0);
    let suffix = arg(args, 1);

    Ok(Value::string(format!("{}{}", handle.as_str().unwrap_or_default().to_uppercase(), suffix)))
}

#[test]
fn host_natives() {
    let mut interpreter = Interpreter::new();
    interpreter.register_native("host.answer", answer);
    interpreter.register_native("count_to", count_to);
    interpreter.register_native("host.twice", twice);

    let source = r#"
        echo host.answer(), count_to(3);
        echo host.twice(blast(x) { return x * 3; }, 2);
    "#;

    assert!(interpreter.has_native("host.twice"));
    assert_eq!(run_with(interpreter, source), "42 [0,1,2]\n18\n");
}

#[test]
fn string_receivers_try_net_natives_first() {
    let mut interpreter = Interpreter::new();
    interpreter.register_native("net.shout", shout);
    interpreter.register_native("net.upper", shout);

    assert_eq!(run_with(interpreter, "echo \"tcp_1\".shout(\"!\"), \"x\".upper(\"?\");"),
               "TCP_1! X?\n");
}

#[test]
fn last_registration_wins() {
    let mut interpreter = Interpreter::new();
    interpreter.register_native("len", answer);

    assert_eq!(run_with(interpreter, "echo len([1, 2]);"), "42\n");
}

#[test]
fn natives_take_priority_over_user_functions() {
    assert_eq!(output("blast len(x) { return -1; } echo len(\"ab\");"), "2\n");
}

#[test]
fn value_constructors() {
    assert_eq!(Value::null(), Value::Null);
    assert_eq!(Value::bool(true).to_string(), "true");
    assert_eq!(Value::float(1.5).to_string(), "1.5");
    assert_eq!(Value::string("s").type_name(), "string");

    let array = Value::array_with_capacity(1);
    assert!(array.array_push(Value::int(7)));
    assert!(!Value::int(1).array_push(Value::int(2)));
    assert_eq!(array.to_string(), "[7]");
}

#[test]
fn statements_run_one_at_a_time_against_persistent_globals() {
    let buffer = OutputBuffer::new();
    let mut interpreter = Interpreter::new().with_output(buffer.clone());

    let lines = ["blast square(x) { return x * x; }",
                 "turbo n = 4;",
                 "n = square(n); echo n;",
                 "throw \"oops\";",
                 "echo n + 1;"];

    let mut thrown = Vec::new();
    for line in lines {
        let mut parser = Parser::new(Lexer::new(line));
        while let Some(statement) = parser.parse_one_statement().unwrap() {
            match interpreter.interpret_statement(&statement) {
                Ok(()) => {},
                Err(RuntimeError::Thrown { value, .. }) => thrown.push(value.to_string()),
                Err(e) => panic!("unexpected failure: {e}"),
            }
        }
    }

    assert_eq!(buffer.contents(), "16\n17\n");
    assert_eq!(thrown, ["oops"]);
}
