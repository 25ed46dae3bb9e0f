//! Black-box scenario tests against the public `parse`/`parse_script`/
//! `parse_module` surface, asserting on the structural shape of the returned
//! AST rather than a serialized JSON string (kept oracle-independent — see
//! `SPEC_FULL.md` §9). These cover the concrete scenarios and boundary
//! behaviors enumerated in spec.md §8.

use ecma_ast::*;
use ecma_parser::{parse_auto_detect, parse_module, parse_script, ErrorKind};
use pretty_assertions::assert_eq;

fn program_item(program: &Program, i: usize) -> &ProgramItem {
    &program.body[i]
}

fn stmt(item: &ProgramItem) -> &Stmt {
    match item {
        ProgramItem::Stmt(s) => s,
        ProgramItem::Module(_) => panic!("expected a statement, got a module declaration"),
    }
}

#[test]
fn arrow_function_with_binary_body() {
    let src = "const add = (a, b) => a + b;";
    let program = parse_script(src).expect("should parse");
    assert_eq!(program.source_type, SourceType::Script);
    assert_eq!(program.body.len(), 1);

    let Stmt::Var(decl) = stmt(program_item(&program, 0)) else {
        panic!("expected a variable declaration");
    };
    assert_eq!(decl.kind, VariableDeclarationKind::Const);
    assert_eq!(decl.declarations.len(), 1);

    let declarator = &decl.declarations[0];
    let Pat::Identifier(id) = &declarator.id else { panic!("expected identifier binding") };
    assert_eq!(&*id.name, "add");

    let Some(Expr::Arrow(arrow)) = &declarator.init else { panic!("expected arrow function init") };
    assert!(!arrow.is_async);
    assert!(arrow.expression);
    assert_eq!(arrow.params.len(), 2);
    let Pat::Identifier(a) = &arrow.params[0] else { panic!("expected identifier param") };
    assert_eq!(&*a.name, "a");
    let Pat::Identifier(b) = &arrow.params[1] else { panic!("expected identifier param") };
    assert_eq!(&*b.name, "b");

    let ArrowFunctionBody::Expr(body) = &arrow.body else { panic!("expected expression body") };
    let Expr::Binary(bin) = body.as_ref() else { panic!("expected binary expression body") };
    assert_eq!(bin.operator, BinaryOperator::Plus);

    // Whole declaration spans the full statement text, start to `;`.
    assert_eq!(decl.span.start, 0);
    assert_eq!(decl.span.end as usize, src.trim_end_matches(';').len() + 1);
}

#[test]
fn import_then_top_level_await_is_module_only() {
    let src = "import { foo } from \"./dep.js\";\nawait foo;";

    let program = parse_module(src).expect("should parse as module");
    assert_eq!(program.source_type, SourceType::Module);
    assert_eq!(program.body.len(), 2);

    let ProgramItem::Module(ModuleDeclaration::Import(import)) = program_item(&program, 0) else {
        panic!("expected an import declaration");
    };
    assert_eq!(import.specifiers.len(), 1);
    let ImportDeclarationSpecifier::Named(spec) = &import.specifiers[0] else {
        panic!("expected a named import specifier");
    };
    let ModuleExportName::Identifier(imported) = &spec.imported else {
        panic!("expected identifier import name");
    };
    assert_eq!(&*imported.name, "foo");
    assert_eq!(&*spec.local.name, "foo");
    assert_eq!(import.source.value, Some(LiteralValue::String("./dep.js".into())));

    let Stmt::Expression(expr_stmt) = stmt(program_item(&program, 1)) else {
        panic!("expected an expression statement");
    };
    let Expr::Await(await_expr) = &expr_stmt.expression else { panic!("expected an await expression") };
    let Expr::Identifier(arg) = &await_expr.argument else { panic!("expected identifier argument") };
    assert_eq!(&*arg.name, "foo");

    // The same source fails as a script: top-level `await` is a SyntaxError
    // outside module goal.
    let err = parse_script(src).expect_err("top-level await must fail in script goal");
    assert_eq!(err.kind, ErrorKind::Early);
}

#[test]
fn template_literal_with_substitution() {
    let src = "`x${1+2}y`;";
    let program = parse_script(src).expect("should parse");
    let Stmt::Expression(expr_stmt) = stmt(program_item(&program, 0)) else {
        panic!("expected an expression statement");
    };
    let Expr::Template(tpl) = &expr_stmt.expression else { panic!("expected a template literal") };

    assert_eq!(tpl.quasis.len(), 2);
    assert_eq!(&*tpl.quasis[0].value.raw, "x");
    assert_eq!(tpl.quasis[0].value.cooked.as_deref(), Some("x"));
    assert!(!tpl.quasis[0].tail);
    assert_eq!(&*tpl.quasis[1].value.raw, "y");
    assert!(tpl.quasis[1].tail);

    assert_eq!(tpl.expressions.len(), 1);
    let Expr::Binary(bin) = &tpl.expressions[0] else { panic!("expected binary expression") };
    assert_eq!(bin.operator, BinaryOperator::Plus);
    let BinaryLeft::Expr(left) = &bin.left else { panic!("expected plain expression left operand") };
    let Expr::Literal(left_lit) = left.as_ref() else { panic!("expected numeric literal") };
    assert_eq!(left_lit.value, Some(LiteralValue::Number(1.0)));
    let Expr::Literal(right_lit) = &bin.right else { panic!("expected numeric literal") };
    assert_eq!(right_lit.value, Some(LiteralValue::Number(2.0)));
}

#[test]
fn private_field_and_private_member_access() {
    let src = "class C { #x; m(){ return this.#x; } }";
    let program = parse_script(src).expect("should parse");
    let Stmt::Class(class_decl) = stmt(program_item(&program, 0)) else {
        panic!("expected a class declaration");
    };
    assert_eq!(class_decl.body.body.len(), 2);

    let ClassMember::Property(field) = &class_decl.body.body[0] else {
        panic!("expected a property definition");
    };
    let PropertyKey::PrivateIdentifier(key) = &field.key else { panic!("expected private key") };
    assert_eq!(&*key.name, "x");
    assert!(field.value.is_none());
    assert!(!field.is_static);
    assert!(!field.computed);

    let ClassMember::Method(method) = &class_decl.body.body[1] else {
        panic!("expected a method definition");
    };
    assert_eq!(method.kind, MethodKind::Method);
    let PropertyKey::Identifier(method_key) = &method.key else { panic!("expected identifier key") };
    assert_eq!(&*method_key.name, "m");
    assert!(method.value.params.is_empty());

    assert_eq!(method.value.body.body.len(), 1);
    let Stmt::Return(ret) = &method.value.body.body[0] else { panic!("expected a return statement") };
    let Some(Expr::Member(member)) = &ret.argument else { panic!("expected a member expression") };
    assert!(matches!(member.object, MemberObject::Expr(_)));
    let MemberObject::Expr(obj) = &member.object else { unreachable!() };
    assert!(matches!(obj.as_ref(), Expr::This(_)));
    let MemberProperty::PrivateIdentifier(prop) = &member.property else {
        panic!("expected a private identifier property");
    };
    assert_eq!(&*prop.name, "x");
    assert!(!member.computed);
    assert!(!member.optional);
}

#[test]
fn private_brand_check_in_expression() {
    let src = "class C { #x; m(o){ return #x in o; } }";
    let program = parse_script(src).expect("should parse");
    let Stmt::Class(class_decl) = stmt(program_item(&program, 0)) else {
        panic!("expected a class declaration");
    };
    let ClassMember::Method(method) = &class_decl.body.body[1] else {
        panic!("expected a method definition");
    };
    let Stmt::Return(ret) = &method.value.body.body[0] else { panic!("expected a return statement") };
    let Some(Expr::Binary(bin)) = &ret.argument else { panic!("expected a binary expression") };
    assert_eq!(bin.operator, BinaryOperator::In);
    let BinaryLeft::PrivateIdentifier(left) = &bin.left else {
        panic!("expected a private identifier left operand");
    };
    assert_eq!(&*left.name, "x");
    let Expr::Identifier(right) = &bin.right else { panic!("expected identifier right operand") };
    assert_eq!(&*right.name, "o");
}

#[test]
fn private_name_use_without_declaration_is_an_early_error() {
    let err = parse_script("class C { m() { return this.#missing; } }")
        .expect_err("undeclared private name must be an early error");
    assert_eq!(err.kind, ErrorKind::Early);
}

#[test]
fn bigint_method_name_object_property() {
    let src = "let o = { 1n() { return \"bar\"; } };";
    let program = parse_script(src).expect("should parse");
    let Stmt::Var(decl) = stmt(program_item(&program, 0)) else {
        panic!("expected variable declaration");
    };
    let Some(Expr::Object(obj)) = &decl.declarations[0].init else { panic!("expected object expression") };
    assert_eq!(obj.properties.len(), 1);
    let ObjectExpressionProperty::Property(prop) = &obj.properties[0] else {
        panic!("expected a property");
    };
    assert!(prop.method);
    assert!(!prop.shorthand);
    assert!(!prop.computed);
    let PropertyKey::Literal(key) = &prop.key else { panic!("expected a literal key") };
    assert_eq!(key.value, None);
    assert_eq!(key.bigint.as_deref(), Some("1"));
    assert_eq!(&*key.raw, "1n");
}

#[test]
fn optional_chain_wraps_outermost_link_once() {
    let src = "a?.b.c?.();";
    let program = parse_script(src).expect("should parse");
    let Stmt::Expression(expr_stmt) = stmt(program_item(&program, 0)) else {
        panic!("expected expression statement");
    };
    let Expr::Chain(chain) = &expr_stmt.expression else { panic!("expected a chain expression") };
    let Expr::Call(call) = &chain.expression else { panic!("expected a call expression") };
    assert!(call.optional);
    assert!(call.arguments.is_empty());

    let Callee::Expr(callee) = &call.callee else { panic!("expected a plain callee") };
    let Expr::Member(outer_member) = callee.as_ref() else { panic!("expected member expression callee") };
    assert!(!outer_member.optional);
    let MemberProperty::Identifier(c) = &outer_member.property else { panic!("expected identifier property") };
    assert_eq!(&*c.name, "c");

    let MemberObject::Expr(inner) = &outer_member.object else { panic!("expected expr object") };
    let Expr::Member(inner_member) = inner.as_ref() else { panic!("expected inner member expression") };
    assert!(inner_member.optional);
    let MemberProperty::Identifier(b) = &inner_member.property else { panic!("expected identifier property") };
    assert_eq!(&*b.name, "b");
}

#[test]
fn asi_return_with_line_terminator_ends_argument() {
    let src = "function f() {\n  return\n  a;\n}";
    let program = parse_script(src).expect("should parse");
    let Stmt::Function(func) = stmt(program_item(&program, 0)) else {
        panic!("expected a function declaration");
    };
    assert_eq!(func.body.body.len(), 2);
    let Stmt::Return(ret) = &func.body.body[0] else { panic!("expected a return statement") };
    assert!(ret.argument.is_none(), "ASI must insert `;` right after `return`");
    let Stmt::Expression(expr_stmt) = &func.body.body[1] else { panic!("expected expression statement") };
    assert!(matches!(expr_stmt.expression, Expr::Identifier(_)));
}

#[test]
fn asi_not_applied_between_identifier_and_call_on_next_line() {
    let src = "a\n(b);";
    let program = parse_script(src).expect("should parse");
    assert_eq!(program.body.len(), 1, "must parse as one call expression statement, not two");
    let Stmt::Expression(expr_stmt) = stmt(program_item(&program, 0)) else {
        panic!("expected expression statement");
    };
    let Expr::Call(call) = &expr_stmt.expression else { panic!("expected a call expression") };
    let Callee::Expr(callee) = &call.callee else { panic!("expected plain callee") };
    assert!(matches!(callee.as_ref(), Expr::Identifier(_)));
    assert_eq!(call.arguments.len(), 1);
}

#[test]
fn legacy_octal_rejected_in_module_goal() {
    let err = parse_module("const x = 0777;").expect_err("legacy octal must fail in module goal");
    assert_eq!(err.kind, ErrorKind::Early);
}

#[test]
fn legacy_octal_accepted_in_sloppy_script() {
    let program = parse_script("var x = 0777;").expect("legacy octal is legal in sloppy script");
    assert_eq!(program.body.len(), 1);
}

#[test]
fn let_bracket_as_member_expression_statement_when_not_a_binding() {
    // `let[0]` at statement position with no following binding shape: `let`
    // is an ordinary identifier being indexed, not a `let` declaration.
    let program = parse_script("let[0] = 1;").expect("should parse as a member assignment");
    let Stmt::Expression(expr_stmt) = stmt(program_item(&program, 0)) else {
        panic!("expected an expression statement, not a variable declaration");
    };
    let Expr::Assignment(assign) = &expr_stmt.expression else { panic!("expected assignment expression") };
    let Pat::Expr(target) = &assign.left else { panic!("expected a member-expression assignment target") };
    assert!(matches!(target.as_ref(), Expr::Member(_)));
}

#[test]
fn let_bracket_is_a_declaration_when_followed_by_a_binding_pattern() {
    let program = parse_script("let [a, b] = [1, 2];").expect("should parse as a declaration");
    let Stmt::Var(decl) = stmt(program_item(&program, 0)) else {
        panic!("expected a variable declaration");
    };
    assert_eq!(decl.kind, VariableDeclarationKind::Let);
    let Pat::Array(pat) = &decl.declarations[0].id else { panic!("expected an array pattern") };
    assert_eq!(pat.elements.len(), 2);
}

#[test]
fn arrow_with_line_terminator_before_arrow_token_is_a_syntax_error() {
    let err = parse_script("const f = (a, b)\n=> a + b;")
        .expect_err("a line terminator between params and `=>` must be rejected");
    assert_eq!(err.kind, ErrorKind::Syntax);
}

#[test]
fn regex_after_yield_in_generator_vs_division_outside_one() {
    // Outside a generator, `yield` is an ordinary identifier and the `/`
    // that follows it is division.
    let program = parse_script("function f() { var yield = 1; return yield / 2; }")
        .expect("should parse as division");
    let Stmt::Function(func) = stmt(program_item(&program, 0)) else { panic!("expected function") };
    let Stmt::Return(ret) = &func.body.body[1] else { panic!("expected return statement") };
    let Some(Expr::Binary(bin)) = &ret.argument else { panic!("expected binary expression") };
    assert_eq!(bin.operator, BinaryOperator::Div);

    // Inside a generator, `yield /re/` is `yield` applied to a regex literal.
    let program = parse_script("function* g() { yield /re/g; }").expect("should parse as a regex");
    let Stmt::Function(func) = stmt(program_item(&program, 0)) else { panic!("expected function") };
    let Stmt::Expression(expr_stmt) = &func.body.body[0] else { panic!("expected expression statement") };
    let Expr::Yield(yield_expr) = &expr_stmt.expression else { panic!("expected yield expression") };
    let Some(Expr::Literal(lit)) = &yield_expr.argument else { panic!("expected literal argument") };
    assert!(lit.regex.is_some());
}

#[test]
fn auto_detect_upgrades_to_module_for_leading_import() {
    let program =
        parse_auto_detect("import x from \"./m.js\";\nawait x;").expect("should auto-detect module goal");
    assert_eq!(program.source_type, SourceType::Module);
}

#[test]
fn auto_detect_keeps_script_goal_for_ordinary_source() {
    let program = parse_auto_detect("const x = 1;").expect("should parse");
    assert_eq!(program.source_type, SourceType::Script);
}

#[test]
fn deterministic_reparse_yields_identical_ast() {
    let src = "class C extends Base { static #count = 0; get x() { return 1; } }";
    let first = parse_script(src).expect("first parse");
    let second = parse_script(src).expect("second parse");
    assert_eq!(first, second);
}

#[test]
fn async_generator_method_with_await_and_yield_star() {
    let src = "class C { async *m() { yield* (await p); } }";
    let program = parse_script(src).expect("should parse");
    let Stmt::Class(class_decl) = stmt(program_item(&program, 0)) else { panic!("expected class") };
    let ClassMember::Method(method) = &class_decl.body.body[0] else { panic!("expected method") };
    assert!(method.value.generator);
    assert!(method.value.is_async);
    let Stmt::Expression(expr_stmt) = &method.value.body.body[0] else {
        panic!("expected expression statement");
    };
    let Expr::Yield(yield_expr) = &expr_stmt.expression else { panic!("expected yield expression") };
    assert!(yield_expr.delegate);
}

#[test]
fn optional_call_import_attributes_are_parsed() {
    let src = "import data from \"./data.json\" with { type: \"json\" };";
    let program = parse_module(src).expect("should parse import attributes");
    let ProgramItem::Module(ModuleDeclaration::Import(import)) = program_item(&program, 0) else {
        panic!("expected import declaration");
    };
    assert_eq!(import.attributes.len(), 1);
    let ModuleExportName::Identifier(key) = &import.attributes[0].key else {
        panic!("expected identifier attribute key");
    };
    assert_eq!(&*key.name, "type");
    assert_eq!(import.attributes[0].value.value, Some(LiteralValue::String("json".into())));
}

#[test]
fn legacy_for_in_with_var_initializer_is_annex_b() {
    let src = "for (var i = 0 in obj) {}";
    let program = parse_script(src).expect("annex B for-in initializer should parse in sloppy mode");
    let Stmt::ForIn(for_in) = stmt(program_item(&program, 0)) else { panic!("expected a for-in statement") };
    let ForHead::VarDecl(var_decl) = &for_in.left else { panic!("expected a var declaration head") };
    assert_eq!(var_decl.kind, VariableDeclarationKind::Var);
    let declarator = &var_decl.declarations[0];
    let Pat::Identifier(id) = &declarator.id else { panic!("expected identifier binding") };
    assert_eq!(&*id.name, "i");
    let Some(Expr::Literal(init)) = &declarator.init else { panic!("expected a numeric initializer") };
    assert_eq!(init.value, Some(LiteralValue::Number(0.0)));
    let Expr::Identifier(right) = &for_in.right else { panic!("expected identifier right-hand side") };
    assert_eq!(&*right.name, "obj");
}

#[test]
fn legacy_for_in_with_var_initializer_is_rejected_in_strict_mode() {
    let src = "\"use strict\";\nfor (var i = 0 in obj) {}";
    let err = parse_script(src).expect_err("annex B for-in initializer is a SyntaxError in strict mode");
    assert_eq!(err.kind, ErrorKind::Syntax);
}
