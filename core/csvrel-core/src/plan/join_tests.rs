//! Join statement builder tests — pure, no backend.

#[cfg(test)]
mod tests {
    use crate::plan::join::{AliasStyle, JoinKind, multi_way_select, two_way_select};

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn requires_condition_per_kind() {
        assert!(JoinKind::Inner.requires_condition());
        assert!(JoinKind::Left.requires_condition());
        assert!(JoinKind::Right.requires_condition());
        assert!(JoinKind::Full.requires_condition());
        assert!(!JoinKind::Cross.requires_condition());
        assert!(!JoinKind::Natural.requires_condition());
    }

    #[test]
    fn uniform_prefixes_every_column() {
        let sql = two_way_select(
            "emp",
            &cols(&["id", "name"]),
            "dept",
            &cols(&["id", "department_name"]),
            JoinKind::Left,
            Some("a.id = b.id"),
            AliasStyle::Uniform,
        );
        assert_eq!(
            sql,
            "SELECT a.id AS a_id, a.name AS a_name, b.id AS b_id, \
             b.department_name AS b_department_name \
             FROM emp a LEFT JOIN dept b ON a.id = b.id"
        );
    }

    #[test]
    fn conflict_aware_prefixes_only_collisions() {
        let sql = two_way_select(
            "emp",
            &cols(&["id", "name"]),
            "dept",
            &cols(&["id", "department_name"]),
            JoinKind::Inner,
            Some("a.id = b.id"),
            AliasStyle::ConflictAware,
        );
        // "id" collides (case-sensitive), the others keep their bare names.
        assert!(sql.contains("a.id AS a_id"));
        assert!(sql.contains("b.id AS b_id"));
        assert!(sql.contains("a.name AS name"));
        assert!(sql.contains("b.department_name AS department_name"));
    }

    #[test]
    fn conflict_detection_is_case_sensitive() {
        let sql = two_way_select(
            "l",
            &cols(&["Id"]),
            "r",
            &cols(&["id"]),
            JoinKind::Inner,
            Some("a.Id = b.id"),
            AliasStyle::ConflictAware,
        );
        assert!(sql.contains("a.Id AS Id"));
        assert!(sql.contains("b.id AS id"));
    }

    #[test]
    fn cross_and_natural_omit_on_clause() {
        let sql = two_way_select(
            "l",
            &cols(&["x"]),
            "r",
            &cols(&["y"]),
            JoinKind::Cross,
            None,
            AliasStyle::Uniform,
        );
        assert_eq!(
            sql,
            "SELECT a.x AS a_x, b.y AS b_y FROM l a CROSS JOIN r b"
        );

        let sql = two_way_select(
            "l",
            &cols(&["x"]),
            "r",
            &cols(&["y"]),
            JoinKind::Natural,
            Some("ignored"),
            AliasStyle::Uniform,
        );
        assert!(sql.ends_with("FROM l a NATURAL JOIN r b"));
    }

    #[test]
    fn multi_way_aliases_follow_target_order() {
        let targets = vec![
            (
                "dept".to_string(),
                JoinKind::Inner,
                Some("a.department_id = b.id".to_string()),
                cols(&["id", "department_name"]),
            ),
            (
                "loc".to_string(),
                JoinKind::Left,
                Some("b.id = c.dept_id".to_string()),
                cols(&["dept_id", "city"]),
            ),
        ];
        let sql = multi_way_select("emp", &cols(&["id", "name"]), &targets);
        assert_eq!(
            sql,
            "SELECT a.id AS a_id, a.name AS a_name, \
             b.id AS b_id, b.department_name AS b_department_name, \
             c.dept_id AS c_dept_id, c.city AS c_city \
             FROM emp a INNER JOIN dept b ON a.department_id = b.id \
             LEFT JOIN loc c ON b.id = c.dept_id"
        );
    }

    #[test]
    fn multi_way_output_column_count_is_sum_of_inputs() {
        let targets = vec![
            (
                "t1".to_string(),
                JoinKind::Inner,
                Some("a.x = b.x".to_string()),
                cols(&["x", "y", "z"]),
            ),
            (
                "t2".to_string(),
                JoinKind::Inner,
                Some("a.x = c.x".to_string()),
                cols(&["x", "w"]),
            ),
        ];
        let sql = multi_way_select("base", &cols(&["p", "q", "r", "s"]), &targets);
        let select_list = sql
            .strip_prefix("SELECT ")
            .unwrap()
            .split(" FROM ")
            .next()
            .unwrap();
        assert_eq!(select_list.split(", ").count(), 4 + 3 + 2);
    }
}
