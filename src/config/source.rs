//! Source formats and parsing
//!
//! Configuration files come as JSON, YAML, or a JavaScript module exporting a
//! single object. JSON and YAML go straight to the YAML parser. JavaScript is
//! parsed with `oxc_parser` and the exported object is evaluated into the same
//! value tree:
//!
//! 1. Top-level declarations are collected: `require('m')` / `import` bindings
//!    become the module string `"m"` (named imports and destructured requires
//!    become `"m#name"`), other `const`/`let`/`var` initializers are kept for
//!    lookup.
//! 2. The export (`module.exports =`, `exports.default =` or `export default`)
//!    is evaluated: object, array, string, number, boolean and `null` literals
//!    map one to one, identifiers resolve through the bindings, and member
//!    access into a bound object is followed.
//! 3. Anything that is code rather than data (spread, function calls other
//!    than `require`, functions, interpolated templates, computed keys) is
//!    rejected with the line it appears on.
//!
//! Unresolvable identifiers and member chains (`colors.gray`) are kept as
//! opaque references, using their source text.

use std::collections::HashMap;
use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    ArrayExpressionElement, AssignmentTarget, BindingPatternKind, CallExpression, Declaration,
    Expression, IdentifierReference, ImportDeclaration, ImportDeclarationSpecifier,
    ObjectExpression, ObjectPropertyKind, Program, PropertyKey, PropertyKind, Statement,
    StaticMemberExpression, TemplateLiteral, VariableDeclarator,
};
use oxc_diagnostics::OxcDiagnostic;
use oxc_parser::Parser;
use oxc_span::{GetSpan, SourceType, Span};
use oxc_syntax::operator::UnaryOperator;
use serde_yaml::{Mapping, Value};

// ============================================================================
// Public API
// ============================================================================

/// Syntax family of a configuration source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// A JavaScript module exporting an object literal (`.js`, `.cjs`, `.mjs`).
    ObjectLiteral,
    /// JSON (`.json`).
    Json,
    /// YAML (any other extension).
    Yaml,
}

impl SourceFormat {
    /// Picks the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("js" | "cjs" | "mjs") => Self::ObjectLiteral,
            Some("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// A syntax error found while parsing a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    /// 1-based line in the input text, when known.
    pub line: Option<usize>,
    /// What went wrong.
    pub message: String,
}

/// Parses `source` into a value tree.
///
/// An empty document (including a script with no statements) yields
/// `Value::Null`.
///
/// # Errors
///
/// Returns a [`SourceError`] if the source is not well-formed, or if a
/// JavaScript source contains code outside the supported data subset.
pub fn parse(source: &str, format: SourceFormat) -> Result<Value, SourceError> {
    match format {
        SourceFormat::Json | SourceFormat::Yaml => {
            serde_yaml::from_str(source).map_err(|e| SourceError {
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })
        }
        SourceFormat::ObjectLiteral => parse_script(source),
    }
}

// ============================================================================
// JavaScript Evaluation
// ============================================================================

fn parse_script(source: &str) -> Result<Value, SourceError> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, SourceType::mjs()).parse();

    if let Some(diagnostic) = ret.errors.first() {
        return Err(diagnostic_error(source, diagnostic));
    }
    if ret.panicked {
        return Err(SourceError {
            line: None,
            message: "parser gave up on this source".to_string(),
        });
    }

    let program = ret.program;
    if program.body.is_empty() {
        return Ok(Value::Null);
    }

    let mut evaluator = Evaluator::new(source);
    let export = evaluator.collect(&program)?;
    let Some(export) = export else {
        return Err(SourceError {
            line: None,
            message: "no configuration object exported \
                      (expected `module.exports = { ... }` or `export default { ... }`)"
                .to_string(),
        });
    };
    evaluator.value(export)
}

/// What a top-level name refers to.
enum Binding<'p, 'a> {
    /// A `require`/`import` binding, rendered as its module string.
    Module(String),
    /// A declared initializer, evaluated on use.
    Value(&'p Expression<'a>),
}

struct Evaluator<'p, 'a> {
    source: &'p str,
    bindings: HashMap<&'p str, Binding<'p, 'a>>,
    resolving: Vec<&'p str>,
}

impl<'p, 'a> Evaluator<'p, 'a> {
    fn new(source: &'p str) -> Self {
        Self {
            source,
            bindings: HashMap::new(),
            resolving: Vec::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Top level
    // ------------------------------------------------------------------------

    /// Records bindings and returns the exported expression, if any.
    fn collect(
        &mut self,
        program: &'p Program<'a>,
    ) -> Result<Option<&'p Expression<'a>>, SourceError> {
        let mut export: Option<&'p Expression<'a>> = None;

        for stmt in &program.body {
            let found = match stmt {
                Statement::ImportDeclaration(import) => {
                    self.import(import);
                    None
                }
                Statement::VariableDeclaration(decl) => {
                    for declarator in &decl.declarations {
                        self.declare(declarator);
                    }
                    None
                }
                Statement::ExportNamedDeclaration(named) => {
                    if let Some(Declaration::VariableDeclaration(decl)) = &named.declaration {
                        for declarator in &decl.declarations {
                            self.declare(declarator);
                        }
                    }
                    None
                }
                Statement::ExportDefaultDeclaration(default) => {
                    match default.declaration.as_expression() {
                        Some(expr) => Some(expr),
                        None => {
                            return Err(self.error(
                                default.span,
                                "export default must be an object, not a function or class",
                            ));
                        }
                    }
                }
                Statement::ExpressionStatement(stmt) => self.export_assignment(&stmt.expression)?,
                _ => None,
            };

            if let Some(expr) = found {
                if export.is_some() {
                    return Err(self.error(stmt.span(), "configuration is exported more than once"));
                }
                export = Some(expr);
            }
        }

        Ok(export)
    }

    /// Matches `module.exports = <expr>` and `exports.default = <expr>`.
    fn export_assignment(
        &self,
        expr: &'p Expression<'a>,
    ) -> Result<Option<&'p Expression<'a>>, SourceError> {
        let Expression::AssignmentExpression(assign) = expr else {
            return Ok(None);
        };
        let AssignmentTarget::StaticMemberExpression(target) = &assign.left else {
            return Ok(None);
        };

        match (member_root(target), target.property.name.as_str()) {
            (Some("module"), "exports") | (Some("exports"), "default")
                if matches!(target.object, Expression::Identifier(_)) =>
            {
                Ok(Some(&assign.right))
            }
            (Some("module" | "exports"), _) => Err(self.error(
                assign.span,
                "assigning individual properties of module.exports is not supported",
            )),
            _ => Ok(None),
        }
    }

    fn import(&mut self, import: &'p ImportDeclaration<'a>) {
        let module = import.source.value.as_str();
        let Some(specifiers) = &import.specifiers else {
            return;
        };
        for spec in specifiers {
            let (local, target) = match spec {
                ImportDeclarationSpecifier::ImportSpecifier(s) => (
                    s.local.name.as_str(),
                    format!("{module}#{}", s.imported.name()),
                ),
                ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => {
                    (s.local.name.as_str(), module.to_string())
                }
                ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => {
                    (s.local.name.as_str(), module.to_string())
                }
            };
            self.bindings.insert(local, Binding::Module(target));
        }
    }

    fn declare(&mut self, declarator: &'p VariableDeclarator<'a>) {
        let Some(init) = &declarator.init else {
            return;
        };
        let module = required_module(init);

        match &declarator.id.kind {
            BindingPatternKind::BindingIdentifier(id) => {
                let binding = match module {
                    Some(module) => Binding::Module(module.to_string()),
                    None => Binding::Value(init),
                };
                self.bindings.insert(id.name.as_str(), binding);
            }
            BindingPatternKind::ObjectPattern(pattern) => {
                let Some(module) = module else {
                    return;
                };
                for property in &pattern.properties {
                    let BindingPatternKind::BindingIdentifier(local) = &property.value.kind else {
                        continue;
                    };
                    let name = match &property.key {
                        PropertyKey::StaticIdentifier(key) => key.name.as_str(),
                        PropertyKey::StringLiteral(key) => key.value.as_str(),
                        _ => continue,
                    };
                    self.bindings.insert(
                        local.name.as_str(),
                        Binding::Module(format!("{module}#{name}")),
                    );
                }
            }
            _ => {}
        }
    }

    // ------------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------------

    fn value(&mut self, expr: &'p Expression<'a>) -> Result<Value, SourceError> {
        match expr {
            Expression::StringLiteral(lit) => Ok(Value::String(lit.value.to_string())),
            Expression::NumericLiteral(lit) => Ok(number(lit.value)),
            Expression::BooleanLiteral(lit) => Ok(Value::Bool(lit.value)),
            Expression::NullLiteral(_) => Ok(Value::Null),
            Expression::TemplateLiteral(tpl) => self.template(tpl).map(Value::String),
            Expression::UnaryExpression(unary) => match (&unary.operator, &unary.argument) {
                (UnaryOperator::UnaryNegation, Expression::NumericLiteral(lit)) => {
                    Ok(number(-lit.value))
                }
                (UnaryOperator::UnaryPlus, Expression::NumericLiteral(lit)) => {
                    Ok(number(lit.value))
                }
                _ => Err(self.error(unary.span, "operators are not supported")),
            },
            Expression::ParenthesizedExpression(inner) => self.value(&inner.expression),
            Expression::ArrayExpression(array) => {
                let mut items = Vec::with_capacity(array.elements.len());
                for element in &array.elements {
                    match element {
                        ArrayExpressionElement::SpreadElement(spread) => {
                            return Err(self.error(spread.span, "spread syntax ('...') is not supported"));
                        }
                        ArrayExpressionElement::Elision(hole) => {
                            return Err(self.error(hole.span, "array holes are not supported"));
                        }
                        _ => {
                            if let Some(item) = element.as_expression() {
                                items.push(self.value(item)?);
                            }
                        }
                    }
                }
                Ok(Value::Sequence(items))
            }
            Expression::ObjectExpression(object) => self.object(object),
            Expression::Identifier(ident) => self.identifier(ident),
            Expression::StaticMemberExpression(member) => self.member(member),
            Expression::CallExpression(call) => self.call(call),
            Expression::ArrowFunctionExpression(_) | Expression::FunctionExpression(_) => {
                Err(self.error(expr.span(), "functions are not supported"))
            }
            _ => Err(self.error(
                expr.span(),
                &format!("unsupported expression '{}'", self.text(expr.span())),
            )),
        }
    }

    fn object(&mut self, object: &'p ObjectExpression<'a>) -> Result<Value, SourceError> {
        let mut map = Mapping::new();
        for property in &object.properties {
            let property = match property {
                ObjectPropertyKind::ObjectProperty(property) => property,
                ObjectPropertyKind::SpreadProperty(spread) => {
                    return Err(self.error(spread.span, "spread syntax ('...') is not supported"));
                }
            };
            if !matches!(property.kind, PropertyKind::Init) || property.method {
                return Err(self.error(property.span, "methods and accessors are not supported"));
            }

            let key = self.key(&property.key, property.computed)?;
            let value = self.value(&property.value)?;
            if map.insert(Value::String(key.clone()), value).is_some() {
                return Err(self.error(property.span, &format!("duplicate key '{key}'")));
            }
        }
        Ok(Value::Mapping(map))
    }

    fn key(&self, key: &'p PropertyKey<'a>, computed: bool) -> Result<String, SourceError> {
        match key {
            PropertyKey::StaticIdentifier(ident) if !computed => Ok(ident.name.to_string()),
            PropertyKey::StringLiteral(lit) => Ok(lit.value.to_string()),
            PropertyKey::NumericLiteral(lit) => Ok(lit.value.to_string()),
            PropertyKey::TemplateLiteral(tpl) => self.template(tpl),
            _ => Err(self.error(key.span(), "computed keys are not supported")),
        }
    }

    fn template(&self, tpl: &TemplateLiteral<'a>) -> Result<String, SourceError> {
        if !tpl.expressions.is_empty() {
            return Err(self.error(tpl.span, "template interpolation ('${...}') is not supported"));
        }
        Ok(tpl
            .quasis
            .first()
            .and_then(|q| q.value.cooked.as_ref())
            .map(ToString::to_string)
            .unwrap_or_default())
    }

    fn identifier(&mut self, ident: &'p IdentifierReference<'a>) -> Result<Value, SourceError> {
        let name = ident.name.as_str();
        let init = match self.bindings.get(name) {
            Some(Binding::Module(module)) => return Ok(Value::String(module.clone())),
            Some(Binding::Value(init)) => *init,
            None if name == "undefined" => return Ok(Value::Null),
            // opaque reference
            None => return Ok(Value::String(name.to_string())),
        };

        if self.resolving.contains(&name) {
            return Err(self.error(ident.span, &format!("'{name}' refers to itself")));
        }
        self.resolving.push(name);
        let value = self.value(init);
        self.resolving.pop();
        value
    }

    /// Follows `a.b` into a bound object, falling back to the source text.
    fn member(&mut self, member: &'p StaticMemberExpression<'a>) -> Result<Value, SourceError> {
        let object = match &member.object {
            Expression::Identifier(ident)
                if matches!(self.bindings.get(ident.name.as_str()), Some(Binding::Value(_))) =>
            {
                Some(self.identifier(ident)?)
            }
            Expression::StaticMemberExpression(inner) => Some(self.member(inner)?),
            _ => None,
        };

        if let Some(Value::Mapping(map)) = object {
            if let Some(value) = map.get(member.property.name.as_str()) {
                return Ok(value.clone());
            }
        }
        Ok(Value::String(self.text(member.span)))
    }

    fn call(&self, call: &'p CallExpression<'a>) -> Result<Value, SourceError> {
        let Expression::Identifier(callee) = &call.callee else {
            return Err(self.error(call.span, "function calls are not supported"));
        };
        if callee.name.as_str() != "require" {
            return Err(self.error(
                call.span,
                &format!("function calls are not supported ('{}(...)')", callee.name),
            ));
        }
        require_argument(call)
            .map(|m| Value::String(m.to_string()))
            .ok_or_else(|| self.error(call.span, "require() expects a single string literal"))
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    fn text(&self, span: Span) -> String {
        self.source
            .get(span.start as usize..span.end as usize)
            .unwrap_or_default()
            .to_string()
    }

    fn error(&self, span: Span, message: &str) -> SourceError {
        SourceError {
            line: Some(line_at(self.source, span.start as usize)),
            message: message.to_string(),
        }
    }
}

// ============================================================================
// Free Helpers
// ============================================================================

/// The leftmost identifier of a member chain (`module` in `module.exports`).
fn member_root<'x>(member: &'x StaticMemberExpression<'_>) -> Option<&'x str> {
    match &member.object {
        Expression::Identifier(ident) => Some(ident.name.as_str()),
        Expression::StaticMemberExpression(inner) => member_root(inner),
        _ => None,
    }
}

/// `require('m')` → `Some("m")`.
fn required_module<'x>(expr: &'x Expression<'_>) -> Option<&'x str> {
    match expr {
        Expression::CallExpression(call) => match &call.callee {
            Expression::Identifier(callee) if callee.name.as_str() == "require" => require_argument(call),
            _ => None,
        },
        _ => None,
    }
}

fn require_argument<'x>(call: &'x CallExpression<'_>) -> Option<&'x str> {
    if call.arguments.len() != 1 {
        return None;
    }
    match call.arguments.first().and_then(|a| a.as_expression()) {
        Some(Expression::StringLiteral(lit)) => Some(lit.value.as_str()),
        _ => None,
    }
}

/// Integral values become integers so `500` stays `500` rather than `500.0`.
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn number(value: f64) -> Value {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
        Value::Number((value as i64).into())
    } else {
        Value::Number(value.into())
    }
}

fn line_at(source: &str, offset: usize) -> usize {
    let end = offset.min(source.len());
    source.as_bytes()[..end].iter().filter(|b| **b == b'\n').count() + 1
}

fn diagnostic_error(source: &str, diagnostic: &OxcDiagnostic) -> SourceError {
    let line = diagnostic
        .labels
        .as_ref()
        .and_then(|labels| labels.first())
        .map(|label| line_at(source, label.offset()));
    SourceError {
        line,
        message: diagnostic.to_string(),
    }
}
