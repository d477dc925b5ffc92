use blast::{
    error::RuntimeError,
    interpreter::evaluator::{
        core::{DEFAULT_MAX_CALL_DEPTH, Interpreter, InterpreterConfig},
        output::OutputBuffer,
    },
    run_source_with,
};
use pretty_assertions::assert_eq;

/// Runs a program and returns its exit status and captured output.
fn run(source: &str) -> (i32, String) {
    let buffer = OutputBuffer::new();
    let mut interpreter = Interpreter::new().with_output(buffer.clone());

    let status = run_source_with(source, &mut interpreter).unwrap_or_else(|e| panic!("Script failed: {e}"));

    (status, buffer.contents())
}

/// Runs a program that must succeed and returns its output.
fn output(source: &str) -> String {
    let (status, out) = run(source);
    assert_eq!(status, 0, "unexpected exit status, output so far:\n{out}");
    out
}

#[test]
fn precedence_scenario() {
    assert_eq!(output("echo(1 + 2 * 3);"), "7\n");
}

#[test]
fn reverse_mutates_the_shared_array() {
    assert_eq!(output("turbo x = [1,2,3]; echo(array.reverse(x)); echo(x);"),
               "null\n[3,2,1]\n");
}

#[test]
fn main_is_called_after_registration() {
    assert_eq!(output("blast add(a, b) { return a + b; } blast main() { echo(add(2,3)); }"),
               "5\n");
}

#[test]
fn range_cruise_is_half_open() {
    assert_eq!(output("cruise (i in 0..3) { echo(i); }"), "0\n1\n2\n");
}

#[test]
fn type_mismatch_is_null() {
    assert_eq!(output("echo(\"a\" + 1);"), "null\n");
}

#[test]
fn arithmetic() {
    assert_eq!(output("echo 7 / 2, 7 % 3, 1.5 + 1, 10 / 0, \"a\" + \"b\", -(2 - 5);"),
               "3 1 2.5 null ab 3\n");
    assert_eq!(output("echo 9223372036854775807 + 1;"),
               "-9223372036854775808\n");
}

#[test]
fn comparison_and_equality() {
    assert_eq!(output("echo 1 < 2, \"a\" < \"b\", 1 == 1.0, \"1\" == 1, null == null, 1 < \"a\";"),
               "true true true false true null\n");
}

#[test]
fn logic_short_circuits() {
    let source = r#"
        turbo hits = 0;
        blast bump() { hits = hits + 1; return true; }
        echo false && bump(), true || bump(), hits;
        echo true && bump(), hits;
    "#;

    assert_eq!(output(source), "false true 0\ntrue 1\n");
}

#[test]
fn truthiness() {
    let source = r#"
        turbo values = [0, 0.0, "", null, false, [], "x", 1];
        cruise (v in values) {
            if (v) echo "yes"; else echo "no";
        }
    "#;

    assert_eq!(output(source), "no\nno\nno\nno\nno\nyes\nyes\nyes\n");
}

#[test]
fn typeof_names() {
    let source = r#"
        struct Point { x, y }
        echo typeof 1, typeof 1.5, typeof "s", typeof [], typeof null, typeof true;
        echo typeof Point, typeof Point { x: 1 }, typeof blast() {};
    "#;

    assert_eq!(output(source),
               "int float string array null bool\nstruct Point function\n");
}

#[test]
fn arrays_are_shared_by_assignment() {
    let source = r#"
        turbo a = [1];
        turbo b = a;
        array.push(b, 2);
        echo a;
        b[0] = 9;
        echo a[0];
        echo a == b, [1] == [1];
    "#;

    assert_eq!(output(source), "[1,2]\n9\ntrue false\n");
}

#[test]
fn index_reads_and_writes() {
    let source = r#"
        turbo xs = [1];
        xs[1] = 2;
        xs[5] = 3;
        echo xs, xs[9], xs[-1], "hey"[1];
    "#;

    assert_eq!(output(source), "[1,2] null null e\n");
}

#[test]
fn nested_values_display() {
    assert_eq!(output("echo [1, \"two\", [3.5, null]], \"top\";"),
               "[1,\"two\",[3.5,null]] top\n");
}

#[test]
fn structs_are_shared_records() {
    let source = r#"
        struct Point { x, y }
        turbo p = Point { x: 1 };
        turbo q = p;
        q.y = 5;
        echo p;
        echo p.z, p["x"];
    "#;

    assert_eq!(output(source), "Point { x: 1, y: 5 }\nnull 1\n");
}

#[test]
fn enums_number_their_variants() {
    let source = r#"
        enum Color { Red, Green = 5, Blue }
        echo Color.Red, Color::Green, Color.Blue;
    "#;

    assert_eq!(output(source), "0 5 6\n");
}

#[test]
fn optional_chaining_and_nullish() {
    let source = r#"
        struct Box { value }
        turbo empty = null;
        turbo full = Box { value: 2 };
        echo empty?.value, full?.value, empty?.[0];
        echo empty ?? "fallback", 0 ?? 1;
    "#;

    assert_eq!(output(source), "null 2 null\nfallback 0\n");
}

#[test]
fn spread_splices_arrays() {
    let source = r#"
        turbo a = [1, 2];
        echo [0, ...a, 3], [...5];
    "#;

    assert_eq!(output(source), "[0,1,2,3] [5]\n");
}

#[test]
fn destructuring() {
    let source = r#"
        struct Pair { left, right }
        turbo [first, _, ...rest] = [1, 2, 3, 4];
        echo first, rest;
        turbo [only, missing] = [1];
        echo missing;
        turbo {left, right} = Pair { left: 3, right: 4 };
        echo left + right;
    "#;

    assert_eq!(output(source), "1 [3,4]\nnull\n7\n");
}

#[test]
fn cruise_over_arrays_uses_a_snapshot() {
    let source = r#"
        turbo xs = [1, 2];
        cruise (x in xs) { array.push(xs, x); }
        echo xs;
    "#;

    assert_eq!(output(source), "[1,2,1,2]\n");
}

#[test]
fn break_and_continue() {
    let source = r#"
        cruise (i in 0..10) {
            if (i == 1) continue;
            if (i == 4) break;
            echo i;
        }
        turbo n = 0;
        loop {
            n = n + 1;
            if (n == 3) break;
        }
        echo n;
    "#;

    assert_eq!(output(source), "0\n2\n3\n3\n");
}

#[test]
fn c_style_cruise_matches_hand_written_loop() {
    let desugared = output("cruise (turbo i = 0; i < 3; i = i + 1) { echo i * 2; } echo i;");
    let manual = output("{ turbo i = 0; loop (i < 3) { echo i * 2; i = i + 1; } } echo i;");

    assert_eq!(desugared, manual);
    assert_eq!(desugared, "0\n2\n4\n3\n");
}

#[test]
fn elif_chain() {
    let source = r#"
        blast grade(n) {
            if (n > 8) return "a";
            elif (n > 5) return "b";
            else return "c";
        }
        echo grade(9), grade(6), grade(1);
    "#;

    assert_eq!(output(source), "a b c\n");
}

#[test]
fn functions_and_recursion() {
    let source = r#"
        blast fib(n) {
            if (n < 2) return n;
            return fib(n - 1) + fib(n - 2);
        }
        blast second(a, b) { return b; }
        turbo double = blast(x) { return x * 2; };
        echo fib(10), second(1), second(1, 2, 3), double(4), nope(1);
    "#;

    assert_eq!(output(source), "55 null 2 8 null\n");
}

#[test]
fn calls_get_their_own_frame() {
    let source = r#"
        turbo x = 1;
        turbo count = 0;
        blast shadow(x) { x = 10; return x; }
        blast inc() { count = count + 1; }
        blast scratch() { turbo local = 1; }
        inc();
        inc();
        scratch();
        echo shadow(5), x, count, local;
    "#;

    assert_eq!(output(source), "10 1 2 null\n");
}

#[test]
fn top_level_runs_before_main() {
    assert_eq!(output("echo \"top\"; blast main() { echo \"main\"; }"),
               "top\nmain\n");
}

#[test]
fn main_return_value_is_the_exit_status() {
    assert_eq!(run("blast main() { return 3; }"), (3, String::new()));
    assert_eq!(run("blast main() { return \"done\"; }").0, 0);
}

#[test]
fn try_catch_finally() {
    let source = r#"
        try { throw "boom"; } catch (e) { echo "caught", e; } finally { echo "done"; }

        blast fail() { throw 42; }
        try { fail(); echo "unreached"; } catch (e) { echo e; }

        blast early() { try { return 1; } finally { return 2; } }
        echo early();

        try { throw 1; } catch { echo "anonymous"; }
    "#;

    assert_eq!(output(source), "caught boom\ndone\n42\n2\nanonymous\n");
}

#[test]
fn uncaught_throw_exits_with_one() {
    assert_eq!(run("echo \"before\"; throw \"x\"; echo \"after\";"),
               (1, "before\n".to_string()));
    assert_eq!(run("try { throw 1; } finally { echo \"f\"; }"),
               (1, "f\n".to_string()));
    assert_eq!(run("blast main() { throw \"late\"; }").0, 1);
}

#[test]
fn import_is_accepted_and_ignored() {
    assert_eq!(output("import std.io; import \"net\"; echo 1;"), "1\n");
}

#[test]
fn parse_errors_run_nothing() {
    assert_eq!(run("echo 1; turbo = ;"), (blast::PARSE_FAILURE_STATUS, String::new()));
}

#[test]
fn runaway_recursion_is_a_runtime_error() {
    let config = InterpreterConfig { max_call_depth: 20 };
    let mut interpreter = Interpreter::with_config(config).with_output(OutputBuffer::new());

    let result = run_source_with("blast down(n) { return down(n + 1); } down(0);",
                                 &mut interpreter);

    match result {
        Err(RuntimeError::StackOverflow { depth, line }) => assert_eq!((depth, line), (20, 1)),
        other => panic!("expected a stack overflow, got {other:?}"),
    }
}

#[test]
fn default_depth_limit_holds_on_an_ordinary_thread() {
    let mut interpreter = Interpreter::new().with_output(OutputBuffer::new());

    let result = run_source_with("blast down(n) { return down(n + 1); } down(0);",
                                 &mut interpreter);

    assert!(matches!(result,
                     Err(RuntimeError::StackOverflow { depth: DEFAULT_MAX_CALL_DEPTH, .. })),
            "{result:?}");
}

#[test]
fn deep_recursion_within_the_limit() {
    assert_eq!(output("blast sum(n) { if (n == 0) return 0; return n + sum(n - 1); } echo sum(500);"),
               "125250\n");
}

#[test]
fn float_division_by_zero_is_null() {
    assert_eq!(output("echo 1.0 / 0, 5 % 0.0, 1 / 0.0, 0.0 / 0.0, 3.0 / 2;"),
               "null null null null 1.5\n");
}

#[test]
fn self_containing_values_print_a_placeholder() {
    let source = r#"
        struct Node { next }
        turbo a = [1];
        array.push(a, a);
        echo a, str(a), len(str(a));
        turbo n = Node {};
        n.next = n;
        echo n, [n];
    "#;

    assert_eq!(output(source),
               "[1,[...]] [1,[...]] 9\nNode { next: Node {...} } [Node { next: Node {...} }]\n");
}
