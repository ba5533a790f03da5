mod route_compilation_tests;
