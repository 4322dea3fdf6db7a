mod comps_tests;
mod map_plot_tests;
mod sonar_tests;
