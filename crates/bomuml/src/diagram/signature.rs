//! Member signature rendering
//!
//! Formats constructors and methods as single markup lines: modifiers,
//! generic fragment, return type, name, and the parameter list.

use crate::model::{Member, MemberKind, ObjectModel, Parameter, Primitive, TypeRef};

/// Append one member line, newline-terminated
pub(crate) fn write_member(out: &mut String, model: &ObjectModel, member: &Member) {
    if member.is_static {
        out.push_str("{static} ");
    }
    if !member.type_parameters.is_empty() {
        write_generic_fragment(out, &member.type_parameters);
        out.push(' ');
    }
    match member.kind {
        MemberKind::Constructor => {
            out.push_str(&member.name);
        }
        MemberKind::Method if member.is_operator => {
            let return_type = return_type_of(member);
            // conversion operators are named after their return type;
            // printing it again would duplicate the name
            if model.qualified_name(&return_type) != member.name {
                out.push_str(&model.display_name(&return_type));
            }
            out.push(' ');
            out.push_str("operator ");
            out.push_str(&member.name);
        }
        MemberKind::Method => {
            let return_type = return_type_of(member);
            out.push_str(&model.display_name(&return_type));
            out.push(' ');
            out.push_str(&member.name);
        }
    }
    out.push('(');
    write_parameter_list(out, model, &member.parameters, member.is_varargs);
    out.push_str(")\n");
}

fn return_type_of(member: &Member) -> TypeRef {
    member
        .return_type
        .clone()
        .unwrap_or(TypeRef::Primitive(Primitive::Void))
}

fn write_generic_fragment(out: &mut String, type_parameters: &[String]) {
    out.push('<');
    for (i, name) in type_parameters.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(name);
    }
    out.push('>');
}

fn write_parameter_list(
    out: &mut String,
    model: &ObjectModel,
    parameters: &[Parameter],
    is_varargs: bool,
) {
    let count = parameters.len();
    for (i, parameter) in parameters.iter().enumerate() {
        if i > 0 {
            // the dialect's line continuation: a literal \t on the next line
            out.push_str(",\n\\t");
        }
        if is_varargs && i == count - 1 {
            let component = parameter
                .parameter_type
                .component()
                .unwrap_or(&parameter.parameter_type);
            out.push_str(&model.short_name(component));
            out.push_str("...");
        } else {
            out.push_str(&model.short_name(&parameter.parameter_type));
        }
        out.push(' ');
        out.push_str(&parameter.name);
    }
}
