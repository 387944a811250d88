use super::*;

fn select(sql: &str) -> Select {
    match parse(sql).unwrap() {
        Statement::Select(s) => s,
        other => panic!("expected select, got {:?}", other),
    }
}

fn filter(statement: &Statement) -> &ConditionChain {
    statement.filter().expect("statement has a where clause")
}

#[test]
fn test_simple_select() {
    let s = select("select foo.bar from foo");
    assert_eq!(s.items, vec![SelectItem::Column(QualColumn::new("foo", "bar"))]);
    assert_eq!(s.tables, vec!["foo".to_string()]);
    assert!(s.filter.is_none());
    assert!(s.order_by.is_empty());
    assert!(!s.for_update);
}

#[test]
fn test_select_is_case_insensitive() {
    let s = select("SELECT Foo.Bar FROM Foo");
    assert_eq!(s.items, vec![SelectItem::Column(QualColumn::new("foo", "bar"))]);
}

#[test]
fn test_select_functions() {
    let s = select("select sum(distinct(boo.boo)), foo.foo, count(1) from dual, foo");
    assert_eq!(s.items.len(), 3);
    assert_eq!(
        s.items[0],
        SelectItem::Call(FunctionCall::new(
            Function::Sum,
            FunctionArg::Call(Box::new(FunctionCall::new(
                Function::Distinct,
                FunctionArg::Column(QualColumn::new("boo", "boo")),
            ))),
        ))
    );
    assert_eq!(
        s.items[2],
        SelectItem::Call(FunctionCall::new(Function::Count, FunctionArg::Number("1".to_string())))
    );
    assert_eq!(s.tables, vec!["dual".to_string(), "foo".to_string()]);
}

#[test]
fn test_from_list_keeps_duplicates() {
    let s = select("select a.x from a, a");
    assert_eq!(s.tables, vec!["a".to_string(), "a".to_string()]);
}

#[test]
fn test_order_by_and_for_update() {
    let s = select(
        "select user_master.login_user_id from user_master \
         order by user_master.login_user_id desc, user_master.x asc, user_master.y for update",
    );
    let dirs: Vec<SortDirection> = s.order_by.iter().map(|k| k.direction).collect();
    assert_eq!(dirs, vec![SortDirection::Desc, SortDirection::Asc, SortDirection::Asc]);
    assert!(s.for_update);
}

#[test]
fn test_insert() {
    let stmt = parse("insert into tbl (tbl.a, tbl.b) values (1, 'x')").unwrap();
    let Statement::Insert(insert) = stmt else {
        panic!("expected insert");
    };
    assert_eq!(insert.table, "tbl");
    assert_eq!(insert.columns.len(), 2);
    assert_eq!(insert.values, vec![Literal::from(1), Literal::from("x")]);
}

#[test]
fn test_insert_length_mismatch_still_parses() {
    let stmt = parse("insert into t (t.a) values (1, 2)").unwrap();
    let Statement::Insert(insert) = stmt else {
        panic!("expected insert");
    };
    assert_eq!(insert.columns.len(), 1);
    assert_eq!(insert.values.len(), 2);
}

#[test]
fn test_update() {
    let stmt = parse(
        "update tablename set foo.boo = 'foo', moo.moo = 300, arg.marg = 'Large.Farge' where boo.boo = foo.foo",
    )
    .unwrap();
    let Statement::Update(update) = &stmt else {
        panic!("expected update");
    };
    assert_eq!(update.table, "tablename");
    assert_eq!(update.assignments.len(), 3);
    assert_eq!(update.assignments[1].value, Literal::from(300));
    assert_eq!(update.assignments[2].value, Literal::Text("Large.Farge".to_string()));
    assert_eq!(filter(&stmt).len(), 1);
}

#[test]
fn test_delete_without_where() {
    let stmt = parse("delete from boo").unwrap();
    assert_eq!(
        stmt,
        Statement::Delete(Delete {
            table: "boo".to_string(),
            filter: None,
        })
    );
}

#[test]
fn test_chain_order_and_joins() {
    let stmt = parse("delete from t where t.a = 1 and t.b = 2 or t.c = 3").unwrap();
    let joins: Vec<Option<JoinType>> = filter(&stmt).terms().map(|(j, _)| j).collect();
    assert_eq!(joins, vec![None, Some(JoinType::And), Some(JoinType::Or)]);
}

#[test]
fn test_group_at_start_and_end() {
    let stmt = parse("delete from t where (t.a = 1 or t.b = 2) and t.c = 3 and (t.d = 4)").unwrap();
    let chain = filter(&stmt);
    assert_eq!(chain.len(), 3);
    assert!(matches!(chain.head.as_ref(), ConditionTerm::Group(g) if g.len() == 2));
    assert!(matches!(chain.tail[1].1, ConditionTerm::Group(_)));
    assert_eq!(
        chain.to_string(),
        "(t.a = 1 or t.b = 2) and t.c = 3 and (t.d = 4)"
    );
}

#[test]
fn test_nested_groups() {
    let stmt = parse("delete from t where ((t.a = 1))").unwrap();
    let ConditionTerm::Group(outer) = filter(&stmt).head.as_ref() else {
        panic!("expected group");
    };
    assert!(matches!(outer.head.as_ref(), ConditionTerm::Group(_)));
}

#[test]
fn test_null_and_like_conditions() {
    let stmt = parse("delete from t where t.a is null and t.b is not null and t.c like 'x%'").unwrap();
    let conds: Vec<&ConditionTerm> = filter(&stmt).terms().map(|(_, t)| t).collect();
    assert!(matches!(
        conds[0],
        ConditionTerm::Condition(Condition::Null { is_null: true, .. })
    ));
    assert!(matches!(
        conds[1],
        ConditionTerm::Condition(Condition::Null { is_null: false, .. })
    ));
    assert!(matches!(
        conds[2],
        ConditionTerm::Condition(Condition::Compare { op: CompareOp::Like, .. })
    ));
}

#[test]
fn test_in_and_not_in_subqueries() {
    let stmt = parse(
        "select a.x from a where a.x in (select b.y from b where b.z = 1) and a.w not in (select c.v from c)",
    )
    .unwrap();
    let conds: Vec<&ConditionTerm> = filter(&stmt).terms().map(|(_, t)| t).collect();
    let ConditionTerm::Condition(Condition::Membership { negated, subquery, .. }) = conds[0] else {
        panic!("expected membership");
    };
    assert!(!negated);
    assert_eq!(subquery.tables, vec!["b".to_string()]);
    assert!(subquery.filter.is_some());
    assert!(matches!(
        conds[1],
        ConditionTerm::Condition(Condition::Membership { negated: true, .. })
    ));
}

#[test]
fn test_literals_get_distinct_ids_in_source_order() {
    let mut names = NameAllocator::new();
    let stmt = parse_with("delete from t where t.a = 'x' and t.b = 'x' or t.c = 5", &mut names).unwrap();
    let ids: Vec<u64> = filter(&stmt)
        .terms()
        .filter_map(|(_, t)| match t {
            ConditionTerm::Condition(Condition::Compare {
                right: Operand::Literal(var),
                ..
            }) => Some(var.id),
            _ => None,
        })
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(names.peek_literal(), 4);
}

#[test]
fn test_quoted_literal_keeps_case() {
    let stmt = parse("delete from t where t.a = 'FooYa'").unwrap();
    let ConditionTerm::Condition(Condition::Compare {
        right: Operand::Literal(var),
        ..
    }) = filter(&stmt).head.as_ref()
    else {
        panic!("expected literal comparison");
    };
    assert_eq!(var.value, Literal::Text("FooYa".to_string()));
}

#[test]
fn test_unqualified_column_is_syntax_error() {
    let err = parse("select bar from foo").unwrap_err();
    assert!(matches!(err, DalError::Syntax { position: 11, .. }));
}

#[test]
fn test_trailing_semicolon_is_lex_error() {
    let err = parse("select foo.bar from foo;").unwrap_err();
    assert!(matches!(err, DalError::Lex { character: ';', .. }));
}

#[test]
fn test_trailing_tokens_rejected() {
    let err = parse("delete from foo foo").unwrap_err();
    match err {
        DalError::Syntax {
            position,
            found,
            expected,
        } => {
            assert_eq!(position, 16);
            assert_eq!(found, "'foo'");
            assert_eq!(expected, "end of input");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_unexpected_end_of_input() {
    let err = parse("select foo.bar from").unwrap_err();
    match err {
        DalError::Syntax { position, found, .. } => {
            assert_eq!(position, 19);
            assert_eq!(found, "end of input");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_unsupported_clauses_are_syntax_errors() {
    for sql in [
        "select a.x from a having a.x = 1",
        "select a.x from a join b",
        "select a.x + a.y from a",
        "update t set t.a = t.b",
        "delete from t where not t.a = 1",
        "",
    ] {
        assert!(
            matches!(parse(sql), Err(DalError::Syntax { .. })),
            "expected syntax error for {:?}",
            sql
        );
    }
}

#[test]
fn test_wide_numbers_keep_their_digits() {
    let stmt = parse("delete from t where t.a = 99999999999999999999").unwrap();
    let (_, term) = filter(&stmt).terms().next().unwrap();
    match term {
        ConditionTerm::Condition(Condition::Compare { right: Operand::Literal(var), .. }) => {
            assert_eq!(var.value, Literal::Number("99999999999999999999".to_string()));
        }
        other => panic!("unexpected term: {:?}", other),
    }
}
