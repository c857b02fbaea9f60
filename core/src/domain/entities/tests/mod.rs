mod event_tests;
