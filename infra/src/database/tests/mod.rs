mod mysql_helpers_tests;
