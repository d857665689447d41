mod solution_changes_builder;
