
// This file organizes the integration tests into a cohesive test suite.
// - smoke_tests: iCal parsing through queries, without a cache
// - feed_mock: the calendar cache driven by a mock feed fetcher
